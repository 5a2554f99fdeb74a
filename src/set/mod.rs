//! Ordered, densely indexed collection of entities of one declared type.
//!
//! Every insertion path runs through [`EntitySet::ensure_entity`], so a member
//! is always either an entity of the declared type or something the set's
//! factory built from raw data for that type. Positions are `0..count()` after
//! every mutation.

use crate::config::{KeyMatching, SetConfig, ValidationMode};
use crate::core::{EntityError, Result, Value};
use crate::entity::{Entity, EntityFactory, Record};
use crate::validation::{Validatable, Validators};
use log::{debug, trace, warn};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

mod cursor;
mod query;
mod snapshot;

pub use cursor::SetCursor;
pub use query::Query;
pub use snapshot::SetSnapshot;

/// Input accepted by every insertion method: a ready entity or raw data.
#[derive(Debug, Clone)]
pub enum SetItem<E> {
    Entity(E),
    Raw(Value),
}

impl<E: Entity> From<E> for SetItem<E> {
    fn from(entity: E) -> Self {
        Self::Entity(entity)
    }
}

impl<E> From<Value> for SetItem<E> {
    fn from(raw: Value) -> Self {
        Self::Raw(raw)
    }
}

impl<E> From<serde_json::Value> for SetItem<E> {
    fn from(raw: serde_json::Value) -> Self {
        Self::Raw(Value::from(raw))
    }
}

/// A homogeneous, ordered collection of entities.
#[derive(Clone)]
pub struct EntitySet<E: Entity = Record> {
    element_type: String,
    factory: Arc<dyn EntityFactory<E>>,
    members: Vec<E>,
    validators: Validators,
    config: SetConfig,
}

// Keep EntitySet implementation split by concern to avoid monolithic files.
include!("set_impl/basics_and_access.rs");
include!("set_impl/mutations.rs");
include!("set_impl/queries_and_aggregation.rs");

impl<E: Entity> Validatable for EntitySet<E> {
    fn validators(&self) -> &Validators {
        &self.validators
    }

    fn validators_mut(&mut self) -> &mut Validators {
        &mut self.validators
    }
}

impl<E: Entity> Index<usize> for EntitySet<E> {
    type Output = E;

    fn index(&self, index: usize) -> &E {
        &self.members[index]
    }
}

impl<'a, E: Entity> IntoIterator for &'a EntitySet<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<E: Entity> IntoIterator for EntitySet<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<E: Entity> fmt::Debug for EntitySet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySet")
            .field("element_type", &self.element_type)
            .field("members", &self.members)
            .field("validators", &self.validators)
            .field("config", &self.config)
            .finish()
    }
}
