use super::{Mapper, Mappers, Relation};
use crate::core::Value;
use crate::validation::{Rule, Validatable, Validators};

/// Declares the shape of one record type: its fields and their defaults,
/// rules, mappers and relations.
#[derive(Debug, Clone, Default)]
pub struct RecordSchema {
    type_name: String,
    fields: Vec<(String, Value)>,
    validators: Validators,
    mappers: Mappers,
    relations: Vec<Relation>,
}

impl RecordSchema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Declares a field defaulting to `Null`.
    pub fn field(self, name: impl Into<String>) -> Self {
        self.field_with_default(name, Value::Null)
    }

    /// Declares a field that takes `default` when raw data omits it.
    pub fn field_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        let name = name.into();
        let default = default.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = default,
            None => self.fields.push((name, default)),
        }
        self
    }

    pub fn rule(mut self, id: impl Into<String>, rule: Rule) -> Self {
        self.validators.insert(id, rule);
        self
    }

    pub fn mapper(mut self, mapper: Mapper) -> Self {
        self.mappers.insert(mapper);
        self
    }

    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.retain(|existing| existing.field() != relation.field());
        self.relations.push(relation);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn mappers(&self) -> &Mappers {
        &self.mappers
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn find_relation(&self, field: &str) -> Option<&Relation> {
        self.relations.iter().find(|relation| relation.field() == field)
    }
}

impl Validatable for RecordSchema {
    fn validators(&self) -> &Validators {
        &self.validators
    }

    fn validators_mut(&mut self) -> &mut Validators {
        &mut self.validators
    }
}
