//! Declarative field rules.
//!
//! A rule never fails the caller: it inspects one field through
//! [`FieldAccess`] and reports a message when the value is unacceptable.

use crate::core::Value;
use crate::entity::FieldAccess;
use crate::expression::pattern;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Field must be present, non-null and not an empty string.
    Required { field: String },
    /// Field text must match an (unanchored) regular expression.
    Pattern { field: String, pattern: String },
    /// Character count for text, element count for lists.
    Length {
        field: String,
        min: Option<usize>,
        max: Option<usize>,
    },
    /// Numeric bounds, inclusive.
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Field text must equal one of the listed values.
    OneOf { field: String, values: Vec<String> },
}

impl Rule {
    pub fn required(field: impl Into<String>) -> Self {
        Self::Required { field: field.into() }
    }

    pub fn pattern(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Pattern {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    pub fn length(field: impl Into<String>, min: Option<usize>, max: Option<usize>) -> Self {
        Self::Length {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::Range {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn one_of<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the field this rule inspects.
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field }
            | Self::Pattern { field, .. }
            | Self::Length { field, .. }
            | Self::Range { field, .. }
            | Self::OneOf { field, .. } => field,
        }
    }

    /// Checks the rule against `entity`, returning a message on violation.
    ///
    /// Only `Required` reports absent or null fields; the other rules skip them.
    pub fn check(&self, entity: &dyn FieldAccess) -> Option<String> {
        let value = entity.field(self.field()).unwrap_or(Value::Null);

        if let Self::Required { field } = self {
            return match &value {
                Value::Null => Some(format!("{} is required", field)),
                Value::Text(text) if text.is_empty() => Some(format!("{} is required", field)),
                _ => None,
            };
        }

        if value.is_null() {
            return None;
        }

        match self {
            Self::Required { .. } => None,
            Self::Pattern { field, pattern } => {
                match pattern::is_match(&value.to_match_string(), pattern, false) {
                    Ok(true) => None,
                    Ok(false) => Some(format!("{} does not match pattern '{}'", field, pattern)),
                    Err(e) => {
                        warn!("Rule on '{}' cannot be checked: {}", field, e);
                        Some(format!("{} has an invalid pattern '{}'", field, pattern))
                    }
                }
            }
            Self::Length { field, min, max } => {
                let length = match &value {
                    Value::List(items) => items.len(),
                    Value::Map(entries) => entries.len(),
                    other => other.to_match_string().chars().count(),
                };
                if let Some(min) = min.filter(|min| length < *min) {
                    return Some(format!("{} must be at least {} long", field, min));
                }
                if let Some(max) = max.filter(|max| length > *max) {
                    return Some(format!("{} must be at most {} long", field, max));
                }
                None
            }
            Self::Range { field, min, max } => {
                let Some(number) = value.as_f64() else {
                    return Some(format!("{} must be numeric", field));
                };
                if let Some(min) = min.filter(|min| number < *min) {
                    return Some(format!("{} must be at least {}", field, min));
                }
                if let Some(max) = max.filter(|max| number > *max) {
                    return Some(format!("{} must be at most {}", field, max));
                }
                None
            }
            Self::OneOf { field, values } => {
                let text = value.to_match_string();
                if values.iter().any(|allowed| *allowed == text) {
                    None
                } else {
                    Some(format!("{} must be one of: {}", field, values.join(", ")))
                }
            }
        }
    }
}
