//! Declaration errors for state machine definitions.

use thiserror::Error;

/// Errors raised while declaring a state machine definition.
///
/// All of these are construction-time failures raised at the offending call;
/// a malformed definition never reaches the runtime or the code-generation
/// collaborator.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("a state named '{name}' is already registered")]
    DuplicateStateName { name: String },

    #[error("the transition already exists: {from} -> {to}")]
    DuplicateTransition { from: String, to: String },

    #[error("state '{name}' does not belong to this definition")]
    ForeignState { name: String },

    #[error("no transitions declared. Add at least one transition before build()")]
    NoTransitions,
}
