//! Definition-time model: states, transitions, and the machine builder.
//!
//! A [`StateMachineDefinition`] is built once per entity type, single
//! threaded, at startup, then treated as read-only and shared by any number
//! of concurrent interpreter instances.

pub mod builder;
mod docs;
mod error;
mod graph;
mod state;
mod transition;

pub use builder::StateMachineBuilder;
pub use error::DefinitionError;
pub use graph::{Graph, GraphEdge, GraphNode};
pub use state::{State, INITIAL_STATE_NAME};
pub use transition::Transition;

use crate::core::{Entity, KindOf};
use std::collections::{HashMap, HashSet};

/// The full set of states and transitions for one entity type.
///
/// Immutable once built; see [`StateMachineBuilder`]. Structural invariants
/// are enforced at declaration time: state names are unique, at most one
/// transition exists per ordered `(from, to)` pair, and the synthesized
/// initial state accepts no real event.
pub struct StateMachineDefinition<C: Entity> {
    entity_type: &'static str,
    states: HashMap<String, State<KindOf<C>>>,
    transitions: Vec<Transition<C>>,
    initial: State<KindOf<C>>,
}

impl<C: Entity> StateMachineDefinition<C> {
    pub(crate) fn new(
        states: HashMap<String, State<KindOf<C>>>,
        transitions: Vec<Transition<C>>,
        initial: State<KindOf<C>>,
    ) -> Self {
        Self {
            entity_type: std::any::type_name::<C>(),
            states,
            transitions,
            initial,
        }
    }

    /// Type name of the entity this definition governs.
    pub fn entity_type(&self) -> &'static str {
        self.entity_type
    }

    /// The synthesized initial pseudo-state.
    pub fn initial_state(&self) -> &State<KindOf<C>> {
        &self.initial
    }

    /// All registered states, unordered.
    ///
    /// The initial state appears once a creation transition registered it.
    pub fn states(&self) -> impl Iterator<Item = &State<KindOf<C>>> {
        self.states.values()
    }

    /// Look up a state by name.
    pub fn state_named(&self, name: &str) -> Option<&State<KindOf<C>>> {
        self.states.get(name)
    }

    /// All transitions, in declaration order.
    pub fn transitions(&self) -> &[Transition<C>] {
        &self.transitions
    }

    /// Whether any transition originates at the initial state.
    pub fn has_creation_transition(&self) -> bool {
        self.transitions.iter().any(|t| t.from.is_initial())
    }

    /// Whether `state` is reachable directly from the initial state.
    pub fn is_creation_destination(&self, state: &State<KindOf<C>>) -> bool {
        self.transitions
            .iter()
            .any(|t| t.from.is_initial() && t.to.name() == state.name())
    }

    /// States not reachable from the initial state, sorted by name.
    ///
    /// Advisory view for modeling-smell tooling; an unreachable state is
    /// legal to declare.
    pub fn unreachable_states(&self) -> Vec<&State<KindOf<C>>> {
        let mut reached: HashSet<&str> = HashSet::new();
        reached.insert(self.initial.name());
        let mut frontier: Vec<&str> = vec![self.initial.name()];
        while let Some(current) = frontier.pop() {
            for transition in &self.transitions {
                if transition.from.name() == current && reached.insert(transition.to.name()) {
                    frontier.push(transition.to.name());
                }
            }
        }

        let mut unreachable: Vec<&State<KindOf<C>>> = self
            .states
            .values()
            .filter(|s| !s.is_initial() && !reached.contains(s.name()))
            .collect();
        unreachable.sort_by(|a, b| a.name().cmp(b.name()));
        unreachable
    }

    /// First transition, in declaration order, firing for the given state
    /// and event kind.
    pub(crate) fn transition_for(
        &self,
        state: &str,
        kind: KindOf<C>,
    ) -> Option<&Transition<C>> {
        self.transitions.iter().find(|t| t.triggers_on(state, kind))
    }
}
