//! Directed transitions between states, with attached behaviors.

use crate::core::{Entity, KindOf, TransitionBehavior};
use crate::definition::state::State;
use std::sync::Arc;

/// A directed edge between two states of the same entity type.
///
/// The edge structurally carries its event expectation: it fires when, in
/// state `from`, an event arrives whose kind equals `to.accepted()`; each
/// state declares the event that causes entry into it. The attached behavior
/// computes the next entity value and chooses which signals to emit.
///
/// Identity is the ordered `(from, to)` name pair; a definition holds at most
/// one transition per pair, in declaration order.
pub struct Transition<C: Entity> {
    pub from: State<KindOf<C>>,
    pub to: State<KindOf<C>>,
    pub behavior: TransitionBehavior<C>,
}

impl<C: Entity> Transition<C> {
    /// Check whether this transition fires for the given state and event kind.
    pub fn triggers_on(&self, state: &str, kind: KindOf<C>) -> bool {
        self.from.name() == state && self.to.accepted() == Some(kind)
    }
}

impl<C: Entity> Clone for Transition<C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            behavior: Arc::clone(&self.behavior),
        }
    }
}
