//! Entity snapshots: the exchange format with the persistence collaborator.
//!
//! A snapshot carries the persistent portion of an interpreter (the entity
//! value, its current-state tag, and the transition log) so persisted
//! workflows survive process restarts. Indexed storage and lookup are
//! entirely the persistence collaborator's concern.

mod error;

pub use error::SnapshotError;

use crate::core::Entity;
use crate::runtime::TransitionLog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version identifier for the snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of an entity and its machine position.
///
/// Does NOT include the definition or its behaviors (not serializable); a
/// restored interpreter is rebuilt against the governing definition with
/// [`EntityStateMachine::from_snapshot`](crate::runtime::EntityStateMachine::from_snapshot).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<C: Entity> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Name of the entity's current state
    pub state: String,

    /// The entity value
    pub entity: C,

    /// Transition log accumulated so far
    pub log: TransitionLog,
}

impl<C: Entity> Snapshot<C> {
    /// Capture a snapshot of the given machine position.
    pub fn new(state: impl Into<String>, entity: C, log: TransitionLog) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            state: state.into(),
            entity,
            log,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, validating the format version.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()?;
        Ok(snapshot)
    }

    /// Serialize to a compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the binary format, validating the format version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate_version()?;
        Ok(snapshot)
    }

    fn validate_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}
