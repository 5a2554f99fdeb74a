use super::{EntitySet, SetItem};
use crate::config::SetConfig;
use crate::core::{Result, Value};
use crate::entity::{Entity, EntityFactory};
use crate::validation::Validators;
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SET_SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Serializable image of a set: declared type, unmapped member exports and
/// rules. Member identity is not kept; restoring rebuilds every member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSnapshot {
    pub format_version: u32,
    pub created_at_unix_ms: i64,
    pub element_type: String,
    pub members: Vec<Value>,
    pub validators: Validators,
}

impl<E: Entity> EntitySet<E> {
    /// Creates a snapshot of the set.
    ///
    /// Members are exported without a mapper, regardless of the configured
    /// default.
    pub fn snapshot(&self) -> Result<SetSnapshot> {
        Ok(SetSnapshot {
            format_version: SET_SNAPSHOT_FORMAT_VERSION,
            created_at_unix_ms: Utc::now().timestamp_millis(),
            element_type: self.element_type.clone(),
            members: self
                .members
                .iter()
                .map(|member| member.to_array(None))
                .collect::<Result<Vec<_>>>()?,
            validators: self.validators.clone(),
        })
    }

    /// Rebuilds a set from `snapshot`, constructing every member afresh
    /// through `factory`.
    pub fn restore(snapshot: SetSnapshot, factory: Arc<dyn EntityFactory<E>>) -> Result<Self> {
        Self::restore_with_config(snapshot, factory, SetConfig::default())
    }

    pub fn restore_with_config(
        snapshot: SetSnapshot,
        factory: Arc<dyn EntityFactory<E>>,
        config: SetConfig,
    ) -> Result<Self> {
        let mut set = Self::with_config(snapshot.element_type, factory, config);
        set.validators = snapshot.validators;
        set.import_items(snapshot.members.into_iter().map(SetItem::Raw), None)?;

        debug!(
            "Restored '{}' set with {} members from format v{}",
            set.element_type,
            set.members.len(),
            snapshot.format_version
        );
        Ok(set)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot()?)?)
    }

    pub fn from_json(json: &str, factory: Arc<dyn EntityFactory<E>>) -> Result<Self> {
        Self::restore(serde_json::from_str(json)?, factory)
    }

    /// MessagePack encoding of [`EntitySet::snapshot`].
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(&self.snapshot()?)?)
    }

    pub fn from_msgpack(bytes: &[u8], factory: Arc<dyn EntityFactory<E>>) -> Result<Self> {
        Self::restore(rmp_serde::from_slice(bytes)?, factory)
    }
}
