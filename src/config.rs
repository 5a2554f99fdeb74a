use crate::core::{EntityError, Result};

/// How `find_keys` reports a matching member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMatching {
    /// The member's index is emitted once for every query field it matched.
    /// A member matching a two-field query appears twice.
    #[default]
    PerField,
    /// The member's index is emitted once.
    PerMember,
}

/// How `EntitySet::validate` combines member and set-level validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Each member is validated once, then every set-level rule is checked
    /// against it.
    #[default]
    PerMember,
    /// Member validation is repeated once per registered set-level rule and
    /// the rules themselves are never checked. With no rules registered the
    /// result is empty.
    PerRule,
}

/// Entity set configuration
#[derive(Debug, Clone, Default)]
pub struct SetConfig {
    /// Duplicate handling in `find_keys`
    pub key_matching: KeyMatching,

    /// Strategy used by `validate`
    pub validation: ValidationMode,

    /// Compile query patterns case-insensitively
    pub case_insensitive: bool,

    /// Mapper applied by `fill` and `to_array` when the caller names none
    pub default_mapper: Option<String>,
}

impl SetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set duplicate handling in `find_keys`
    pub fn key_matching(mut self, key_matching: KeyMatching) -> Self {
        self.key_matching = key_matching;
        self
    }

    /// Set the validation strategy
    pub fn validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    /// Match query patterns case-insensitively
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Set the default mapper name
    pub fn default_mapper(mut self, mapper: &str) -> Self {
        self.default_mapper = Some(mapper.to_string());
        self
    }

    /// Resolves the mapper to use for an import or export call.
    pub fn mapper<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested.or(self.default_mapper.as_deref())
    }

    /// Parse from a settings string
    ///
    /// Format: `"key_matching=per_member;validation=per_rule;case_insensitive=true;default_mapper=api"`.
    /// Entries may be separated by `;` or `,`. Unknown keys are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use entityset::{KeyMatching, SetConfig};
    ///
    /// let config = SetConfig::from_pairs("key_matching=per_member").unwrap();
    /// assert_eq!(config.key_matching, KeyMatching::PerMember);
    /// ```
    pub fn from_pairs(settings: &str) -> Result<Self> {
        let mut config = Self::default();

        for entry in settings.split([';', ',']) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (key, value) = entry.split_once('=').ok_or_else(|| {
                EntityError::InvalidArgument(format!("Setting '{}' must be key=value", entry))
            })?;

            match (key.trim(), value.trim()) {
                ("key_matching", "per_field") => config.key_matching = KeyMatching::PerField,
                ("key_matching", "per_member") => config.key_matching = KeyMatching::PerMember,
                ("validation", "per_member") => config.validation = ValidationMode::PerMember,
                ("validation", "per_rule") => config.validation = ValidationMode::PerRule,
                ("case_insensitive", flag) => {
                    config.case_insensitive = flag.parse().map_err(|_| {
                        EntityError::InvalidArgument(format!(
                            "case_insensitive expects true or false, got '{}'",
                            flag
                        ))
                    })?;
                }
                ("default_mapper", "") => config.default_mapper = None,
                ("default_mapper", name) => config.default_mapper = Some(name.to_string()),
                (key, value) => {
                    return Err(EntityError::InvalidArgument(format!(
                        "Unknown setting {}={}",
                        key, value
                    )));
                }
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SetConfig::default();
        assert_eq!(config.key_matching, KeyMatching::PerField);
        assert_eq!(config.validation, ValidationMode::PerMember);
        assert!(!config.case_insensitive);
        assert!(config.default_mapper.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SetConfig::new()
            .key_matching(KeyMatching::PerMember)
            .validation(ValidationMode::PerRule)
            .case_insensitive(true)
            .default_mapper("api");

        assert_eq!(config.key_matching, KeyMatching::PerMember);
        assert_eq!(config.validation, ValidationMode::PerRule);
        assert!(config.case_insensitive);
        assert_eq!(config.mapper(None), Some("api"));
        assert_eq!(config.mapper(Some("db")), Some("db"));
    }

    #[test]
    fn test_from_pairs() {
        let config = SetConfig::from_pairs(
            "key_matching=per_member; validation=per_rule, case_insensitive=true;default_mapper=api",
        )
        .unwrap();

        assert_eq!(config.key_matching, KeyMatching::PerMember);
        assert_eq!(config.validation, ValidationMode::PerRule);
        assert!(config.case_insensitive);
        assert_eq!(config.default_mapper.as_deref(), Some("api"));
    }

    #[test]
    fn test_invalid_pairs() {
        assert!(SetConfig::from_pairs("key_matching").is_err());
        assert!(SetConfig::from_pairs("key_matching=sometimes").is_err());
        assert!(SetConfig::from_pairs("case_insensitive=maybe").is_err());
        assert!(SetConfig::from_pairs("colour=blue").is_err());
        assert!(SetConfig::from_pairs("").is_ok());
    }
}
