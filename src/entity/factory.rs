use super::record::nested_mapper;
use super::{EntityFactory, Record, RecordSchema, Related, RelationKind};
use crate::config::SetConfig;
use crate::core::{EntityError, Result, Value};
use crate::set::EntitySet;
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of record schemas, keyed by type name.
///
/// Cloning is cheap; the registry is shared. Register every schema before
/// handing the factory to a set.
#[derive(Debug, Clone, Default)]
pub struct RecordFactory {
    schemas: Arc<HashMap<String, Arc<RecordSchema>>>,
}

impl RecordFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema`, replacing any schema with the same type name.
    pub fn register(mut self, schema: RecordSchema) -> Self {
        Arc::make_mut(&mut self.schemas)
            .insert(schema.type_name().to_string(), Arc::new(schema));
        self
    }

    pub fn schema(&self, type_name: &str) -> Result<&Arc<RecordSchema>> {
        self.schemas
            .get(type_name)
            .ok_or_else(|| EntityError::UnknownType(type_name.to_string()))
    }

    /// Builds a record of `type_name` from raw data without a mapper.
    pub fn create(&self, type_name: &str, raw: impl Into<Value>) -> Result<Record> {
        self.construct(type_name, &raw.into(), None)
    }

    /// Creates an empty set of `type_name` records backed by this factory.
    pub fn set(&self, type_name: &str) -> Result<EntitySet<Record>> {
        self.set_with_config(type_name, SetConfig::default())
    }

    pub fn set_with_config(&self, type_name: &str, config: SetConfig) -> Result<EntitySet<Record>> {
        self.schema(type_name)?;
        Ok(EntitySet::with_config(
            type_name,
            Arc::new(self.clone()),
            config,
        ))
    }

    fn build_related(&self, kind: RelationKind, target: &str, raw: Option<&Value>, mapper: Option<&str>) -> Result<Related> {
        let target_schema = self.schema(target)?;
        let mapper = nested_mapper(target_schema, mapper);

        match (kind, raw) {
            (RelationKind::OneToOne, None | Some(Value::Null)) => Ok(Related::One(None)),
            (RelationKind::OneToOne, Some(raw)) => Ok(Related::One(Some(Box::new(
                self.construct(target, raw, mapper)?,
            )))),
            (RelationKind::OneToMany, raw) => {
                let mut set = self.set(target)?;
                if let Some(raw) = raw {
                    set.fill_value(raw, mapper)?;
                }
                Ok(Related::Many(set))
            }
        }
    }
}

impl EntityFactory<Record> for RecordFactory {
    fn construct(&self, type_name: &str, raw: &Value, mapper: Option<&str>) -> Result<Record> {
        let schema = self.schema(type_name)?;

        if !matches!(raw, Value::Map(_)) {
            return Err(EntityError::Construction(format!(
                "'{}' expects map data, got {}",
                type_name,
                raw.type_name()
            )));
        }

        let data = schema.mappers().import(mapper, raw)?;
        trace!("Constructing '{}' record (mapper: {:?})", type_name, mapper);

        let related = schema
            .relations()
            .iter()
            .map(|relation| {
                let related = self.build_related(
                    relation.kind(),
                    relation.target(),
                    data.get(relation.field()),
                    mapper,
                )?;
                Ok((relation.field().to_string(), related))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut record = Record::with_defaults(Arc::clone(schema), related);
        if let Value::Map(entries) = data {
            for (key, value) in entries {
                if schema.find_relation(&key).is_none() {
                    record.set(&key, value)?;
                }
            }
        }

        Ok(record)
    }
}
