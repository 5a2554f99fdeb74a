// ============================================================================
// EntitySet Library
// ============================================================================

pub mod core;
pub mod config;
pub mod entity;
pub mod set;
pub mod validation;
mod expression;

// Re-export main types for convenience
pub use crate::core::{EntityError, Result, Value};
pub use config::{KeyMatching, SetConfig, ValidationMode};
pub use entity::{
    Entity, EntityFactory, FieldAccess, Mapper, Mappers, Record, RecordFactory, RecordSchema,
    Related, Relation, RelationKind,
};
pub use set::{EntitySet, Query, SetCursor, SetItem, SetSnapshot};
pub use validation::{Rule, Validatable, Validators};

/// Builds a [`RecordFactory`] and an empty set of `type_name` records in one step.
///
/// # Examples
///
/// ```
/// use entityset::{Query, RecordSchema, Rule, record_set};
/// use serde_json::json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut items = record_set(
///     "Item",
///     [RecordSchema::new("Item").field("name").rule("name", Rule::required("name"))],
/// )?;
///
/// items.append(json!({"name": "x"}))?;
/// items.append(json!({"name": "y"}))?;
/// items.append(json!({"name": "x"}))?;
///
/// let found = items.find(&Query::from([("name", "x")]), 0, 0)?;
/// assert_eq!(found.count(), 2);
/// assert!(items.validate().is_empty());
/// # Ok(())
/// # }
/// ```
pub fn record_set<I>(type_name: &str, schemas: I) -> Result<EntitySet<Record>>
where
    I: IntoIterator<Item = RecordSchema>,
{
    schemas
        .into_iter()
        .fold(RecordFactory::new(), RecordFactory::register)
        .set(type_name)
}
