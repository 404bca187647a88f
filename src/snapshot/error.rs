//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur at the snapshot boundary.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot references a state the definition does not declare
    #[error("snapshot references unknown state '{state}'")]
    UnknownState { state: String },
}
