//! Transition behaviors: the pluggable entity-value computation.
//!
//! A behavior is the only place domain-specific mutation occurs. It receives
//! the current entity and the triggering event, may emit signals through the
//! [`SignalEmitter`], and returns the next entity value. State movement and
//! signal bookkeeping stay with the interpreter.

use crate::core::entity::Entity;
use crate::signal::{SignalEmitter, SignalError};
use std::sync::Arc;
use thiserror::Error;

/// Failure raised by a transition behavior.
///
/// Carries a diagnostic message; the interpreter wraps it with the
/// transition's endpoints before propagating, so the prior entity snapshot is
/// never corrupted by a half-applied computation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BehaviorError {
    message: String,
}

impl BehaviorError {
    /// Create a behavior error from a diagnostic message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SignalError> for BehaviorError {
    fn from(err: SignalError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Type alias for per-transition behavior functions.
///
/// Behaviors are pure value-to-value: same entity and event in, same entity
/// and signals out. They are shared by every interpreter instance built from
/// the owning definition.
pub type TransitionBehavior<C> = Arc<
    dyn Fn(&C, &<C as Entity>::Event, &mut SignalEmitter<C>) -> Result<C, BehaviorError>
        + Send
        + Sync,
>;

/// Wrap a closure as a transition behavior.
pub fn behavior<C, F>(f: F) -> TransitionBehavior<C>
where
    C: Entity,
    F: Fn(&C, &C::Event, &mut SignalEmitter<C>) -> Result<C, BehaviorError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Behavior that returns the entity unchanged and emits nothing.
pub fn unchanged<C: Entity>() -> TransitionBehavior<C> {
    Arc::new(|entity: &C, _event, _signals| Ok(entity.clone()))
}
