//! Core type contracts for entities, events, and transition behaviors.
//!
//! This module contains the pure heart of the formalism:
//! - Entity and event contracts via the `Entity`/`Event`/`EventKind` traits
//! - Transition behaviors as plain value-to-value functions
//!
//! All logic in this module is pure (no side effects); the kind tags that
//! drive transition matching are fixed at definition-construction time.

mod behavior;
mod entity;
pub mod macros;

pub use behavior::{behavior, unchanged, BehaviorError, TransitionBehavior};
pub use entity::{Entity, Event, EventKind, KindOf};
