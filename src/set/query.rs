use crate::core::{Result, Value};
use crate::entity::FieldAccess;
use crate::expression::pattern;

/// Field name to regular expression pairs, all of which must match.
///
/// Patterns are unanchored and matched against the field's text form
/// (see [`Value::to_match_string`]); absent fields read as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    conditions: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition; a repeated field replaces its earlier pattern.
    pub fn field(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let name = name.into();
        let pattern = pattern.into();
        match self.conditions.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = pattern,
            None => self.conditions.push((name, pattern)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.conditions
            .iter()
            .map(|(field, pattern)| (field.as_str(), pattern.as_str()))
    }

    /// Returns `true` when every condition matches `entity`.
    ///
    /// A malformed pattern fails with `InvalidPattern`.
    pub fn matches(&self, entity: &dyn FieldAccess, case_insensitive: bool) -> Result<bool> {
        for (field, expression) in &self.conditions {
            let text = entity
                .field(field)
                .unwrap_or(Value::Null)
                .to_match_string();
            if !pattern::is_match(&text, expression, case_insensitive)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<K, P, const N: usize> From<[(K, P); N]> for Query
where
    K: Into<String>,
    P: Into<String>,
{
    fn from(conditions: [(K, P); N]) -> Self {
        conditions
            .into_iter()
            .fold(Query::new(), |query, (field, pattern)| query.field(field, pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl FieldAccess for Named {
        fn field(&self, name: &str) -> Option<Value> {
            (name == "name").then(|| Value::from(self.0))
        }
    }

    #[test]
    fn test_all_conditions_must_match() {
        let query = Query::from([("name", "^a"), ("name", "x$")]);
        assert_eq!(query.len(), 1);
        assert!(query.matches(&Named("abx"), false).unwrap());
        assert!(!query.matches(&Named("ab"), false).unwrap());

        let query = Query::new().field("name", "a").field("missing", "^$");
        assert!(query.matches(&Named("a"), false).unwrap());
    }

    #[test]
    fn test_empty_query_matches() {
        assert!(Query::new().matches(&Named("anything"), false).unwrap());
    }

    #[test]
    fn test_malformed_pattern() {
        assert!(Query::from([("name", "[")]).matches(&Named("a"), false).is_err());
    }
}
