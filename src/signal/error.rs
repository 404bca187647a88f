//! Signal construction errors.

use thiserror::Error;

/// Errors raised at signal-creation time.
///
/// A malformed signal must fail here, inside the emitting behavior, rather
/// than propagate into the dispatcher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("signal to entity type '{entity_type}' is missing a target identity")]
    MissingTargetId { entity_type: &'static str },
}
