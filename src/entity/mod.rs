//! Entity contracts and the dynamic `Record` entity.
//!
//! A set only ever talks to its members through [`FieldAccess`] and
//! [`Entity`], and builds new members through an [`EntityFactory`] bound at
//! construction time.

use crate::core::{Result, Value};
use std::fmt;

mod factory;
mod mapper;
mod record;
mod relation;
mod schema;

pub use factory::RecordFactory;
pub use mapper::{Mapper, Mappers};
pub use record::{Record, Related};
pub use relation::{Relation, RelationKind};
pub use schema::RecordSchema;

/// Named field lookup used by queries, aggregation and rules.
pub trait FieldAccess {
    /// Returns the value of `name`, or `None` when the entity has no such field.
    fn field(&self, name: &str) -> Option<Value>;
}

/// Core trait for members of an [`EntitySet`](crate::EntitySet).
pub trait Entity: FieldAccess + fmt::Debug {
    /// Returns the declared type name of the entity.
    fn type_name(&self) -> &str;
    /// Exports the entity as an ordered map, optionally through a named mapper.
    fn to_array(&self, mapper: Option<&str>) -> Result<Value>;
    /// Returns the entity's validation messages; empty when valid.
    fn validate(&self) -> Vec<String>;
}

/// Builds entities of a declared type from raw data.
pub trait EntityFactory<E>: Send + Sync {
    fn construct(&self, type_name: &str, raw: &Value, mapper: Option<&str>) -> Result<E>;
}

impl<E, F> EntityFactory<E> for F
where
    F: Fn(&str, &Value, Option<&str>) -> Result<E> + Send + Sync,
{
    fn construct(&self, type_name: &str, raw: &Value, mapper: Option<&str>) -> Result<E> {
        self(type_name, raw, mapper)
    }
}
