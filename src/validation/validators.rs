use super::Rule;
use crate::entity::FieldAccess;
use serde::{Deserialize, Serialize};

/// Ordered mapping from validator id to rule.
///
/// Insertion order is the order rules are checked in and the order they
/// serialize in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Validators {
    rules: Vec<(String, Rule)>,
}

impl Validators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `rule` under `id`, returning the rule it replaced.
    pub fn insert(&mut self, id: impl Into<String>, rule: Rule) -> Option<Rule> {
        let id = id.into();
        match self.rules.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, rule)),
            None => {
                self.rules.push((id, rule));
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, rule)| rule)
    }

    pub fn remove(&mut self, id: &str) -> Option<Rule> {
        let position = self.rules.iter().position(|(existing, _)| existing == id)?;
        Some(self.rules.remove(position).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(id, rule)| (id.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule against `entity`, in registration order.
    pub fn check(&self, entity: &dyn FieldAccess) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|(_, rule)| rule.check(entity))
            .collect()
    }
}

/// Capability shared by everything that carries validator rules.
pub trait Validatable {
    fn validators(&self) -> &Validators;

    fn validators_mut(&mut self) -> &mut Validators;

    fn add_validator(&mut self, id: impl Into<String>, rule: Rule) -> &mut Self
    where
        Self: Sized,
    {
        self.validators_mut().insert(id, rule);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut validators = Validators::new();
        validators.insert("name", Rule::required("name"));
        validators.insert("qty", Rule::range("qty", Some(0.0), None));
        let replaced = validators.insert("name", Rule::length("name", Some(1), None));

        assert_eq!(replaced, Some(Rule::required("name")));
        let ids: Vec<&str> = validators.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["name", "qty"]);
        assert_eq!(validators.get("name"), Some(&Rule::length("name", Some(1), None)));
    }

    #[test]
    fn test_remove() {
        let mut validators = Validators::new();
        validators.insert("name", Rule::required("name"));
        assert!(validators.remove("missing").is_none());
        assert_eq!(validators.remove("name"), Some(Rule::required("name")));
        assert!(validators.is_empty());
    }

    #[test]
    fn test_serde_keeps_order() {
        let mut validators = Validators::new();
        validators.insert("b", Rule::required("b"));
        validators.insert("a", Rule::required("a"));

        let json = serde_json::to_string(&validators).unwrap();
        let back: Validators = serde_json::from_str(&json).unwrap();
        assert_eq!(back, validators);
        assert_eq!(back.iter().next().map(|(id, _)| id), Some("b"));
    }
}
