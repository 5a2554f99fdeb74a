use super::{Entity, FieldAccess, RecordSchema};
use crate::core::{EntityError, Result, Value};
use crate::set::EntitySet;
use crate::validation::Validatable;
use std::sync::Arc;

/// Entities held by a relation field.
#[derive(Debug, Clone)]
pub enum Related {
    One(Option<Box<Record>>),
    Many(EntitySet<Record>),
}

impl Related {
    fn export(&self, mapper: Option<&str>) -> Result<Value> {
        match self {
            Self::One(Some(record)) => record.to_array(nested_mapper(record.schema(), mapper)),
            Self::One(None) => Ok(Value::Null),
            Self::Many(set) => {
                let mapper = set
                    .first()
                    .and_then(|record| nested_mapper(record.schema(), mapper));
                Ok(Value::List(set.to_array(mapper)?))
            }
        }
    }

    fn validate(&self) -> Vec<String> {
        match self {
            Self::One(Some(record)) => record.validate(),
            Self::One(None) => Vec::new(),
            Self::Many(set) => set.validate(),
        }
    }
}

/// Nested entities only see a mapper when their own schema defines it.
pub(crate) fn nested_mapper<'a>(schema: &RecordSchema, mapper: Option<&'a str>) -> Option<&'a str> {
    mapper.filter(|name| schema.mappers().contains(name))
}

/// A schema-driven entity with ordered fields and nested relations.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<RecordSchema>,
    fields: Vec<(String, Value)>,
    related: Vec<(String, Related)>,
}

impl Record {
    /// Creates a record holding the schema's defaults and empty relations.
    pub(crate) fn with_defaults(schema: Arc<RecordSchema>, related: Vec<(String, Related)>) -> Self {
        Self {
            fields: schema.fields().to_vec(),
            schema,
            related,
        }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Sets a plain field, adding it when undeclared. Relation fields are
    /// changed through [`Record::related_mut`].
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if self.schema.find_relation(name).is_some() {
            return Err(EntityError::InvalidArgument(format!(
                "'{}' is a relation of '{}'",
                name,
                self.schema.type_name()
            )));
        }

        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
        Ok(())
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn related(&self, name: &str) -> Option<&Related> {
        self.related
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, related)| related)
    }

    pub fn related_mut(&mut self, name: &str) -> Option<&mut Related> {
        self.related
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, related)| related)
    }

    /// The one-to-one entity behind `name`, if set.
    pub fn one(&self, name: &str) -> Option<&Record> {
        match self.related(name)? {
            Related::One(record) => record.as_deref(),
            Related::Many(_) => None,
        }
    }

    /// The one-to-many set behind `name`.
    pub fn many(&self, name: &str) -> Option<&EntitySet<Record>> {
        match self.related(name)? {
            Related::Many(set) => Some(set),
            Related::One(_) => None,
        }
    }

    pub fn many_mut(&mut self, name: &str) -> Option<&mut EntitySet<Record>> {
        match self.related_mut(name)? {
            Related::Many(set) => Some(set),
            Related::One(_) => None,
        }
    }
}

impl FieldAccess for Record {
    fn field(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.get(name) {
            return Some(value.clone());
        }
        self.related(name)
            .and_then(|related| related.export(None).ok())
    }
}

impl Entity for Record {
    fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    fn to_array(&self, mapper: Option<&str>) -> Result<Value> {
        let mut entries = self.fields.clone();
        for (name, related) in &self.related {
            entries.push((name.clone(), related.export(mapper)?));
        }
        self.schema.mappers().export(mapper, Value::Map(entries))
    }

    fn validate(&self) -> Vec<String> {
        let mut messages = self.schema.validators().check(self);
        for (name, related) in &self.related {
            messages.extend(
                related
                    .validate()
                    .into_iter()
                    .map(|message| format!("{}: {}", name, message)),
            );
        }
        messages
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name()
            && matches!(
                (self.to_array(None), other.to_array(None)),
                (Ok(a), Ok(b)) if a == b
            )
    }
}
