//! Builder for constructing state machine definitions.

use crate::core::{Entity, EventKind, KindOf, TransitionBehavior};
use crate::definition::error::DefinitionError;
use crate::definition::state::{State, INITIAL_STATE_NAME};
use crate::definition::transition::Transition;
use crate::definition::StateMachineDefinition;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Builder that accumulates states and transitions into an immutable
/// [`StateMachineDefinition`].
///
/// The builder synthesizes the initial pseudo-state on creation. Validation
/// is raised synchronously at the offending call: duplicate state names and
/// duplicate `(from, to)` pairs fail immediately rather than at `build()`.
pub struct StateMachineBuilder<C: Entity> {
    states: HashMap<String, State<KindOf<C>>>,
    transitions: Vec<Transition<C>>,
    initial: State<KindOf<C>>,
}

impl<C: Entity> StateMachineBuilder<C> {
    /// Create a new builder with a synthesized initial pseudo-state.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            transitions: Vec::new(),
            initial: State::initial(),
        }
    }

    /// Register a new state accepting the given event kind.
    ///
    /// The name `"Initial"` is reserved for the synthesized pseudo-state and
    /// is auto-suffixed to `"Initial_1"` rather than rejected. Any other
    /// collision fails with [`DefinitionError::DuplicateStateName`].
    pub fn state(
        &mut self,
        name: impl Into<String>,
        accepts: KindOf<C>,
    ) -> Result<State<KindOf<C>>, DefinitionError> {
        let mut name = name.into();
        if name == INITIAL_STATE_NAME {
            name.push_str("_1");
        }
        if self.states.contains_key(&name) {
            return Err(DefinitionError::DuplicateStateName { name });
        }
        let state = State::new(name, accepts);
        debug!(state = state.name(), event = accepts.name(), "adding state");
        self.states.insert(state.name().to_string(), state.clone());
        Ok(state)
    }

    /// Add a transition between two registered states.
    ///
    /// Fails with [`DefinitionError::DuplicateTransition`] if the `(from,
    /// to)` pair already exists; the transition list is unchanged by the
    /// failed attempt. Both states are registered if not already present.
    pub fn transition(
        &mut self,
        from: &State<KindOf<C>>,
        to: &State<KindOf<C>>,
        behavior: TransitionBehavior<C>,
    ) -> Result<(), DefinitionError> {
        self.add_edge(from.clone(), to.clone(), behavior)
    }

    /// Link the synthesized initial state to `to`, marking a creation entry
    /// point: `to` becomes reachable directly upon entity creation.
    pub fn initial_transition(
        &mut self,
        to: &State<KindOf<C>>,
        behavior: TransitionBehavior<C>,
    ) -> Result<(), DefinitionError> {
        let initial = self.initial.clone();
        self.add_edge(initial, to.clone(), behavior)
    }

    fn add_edge(
        &mut self,
        from: State<KindOf<C>>,
        to: State<KindOf<C>>,
        behavior: TransitionBehavior<C>,
    ) -> Result<(), DefinitionError> {
        if self
            .transitions
            .iter()
            .any(|t| t.from.name() == from.name() && t.to.name() == to.name())
        {
            return Err(DefinitionError::DuplicateTransition {
                from: from.name().to_string(),
                to: to.name().to_string(),
            });
        }
        self.register(&from)?;
        self.register(&to)?;
        debug!(from = from.name(), to = to.name(), "adding transition");
        self.transitions.push(Transition { from, to, behavior });
        Ok(())
    }

    fn register(&mut self, state: &State<KindOf<C>>) -> Result<(), DefinitionError> {
        match self.states.get(state.name()) {
            Some(existing) if existing == state => Ok(()),
            Some(_) => Err(DefinitionError::ForeignState {
                name: state.name().to_string(),
            }),
            None => {
                self.states.insert(state.name().to_string(), state.clone());
                Ok(())
            }
        }
    }

    /// Finalize the definition.
    ///
    /// Fails with [`DefinitionError::NoTransitions`] on an empty transition
    /// list. States unreachable from the initial state are a modeling smell
    /// and logged as a warning, not rejected.
    pub fn build(self) -> Result<StateMachineDefinition<C>, DefinitionError> {
        if self.transitions.is_empty() {
            return Err(DefinitionError::NoTransitions);
        }

        let definition = StateMachineDefinition::new(self.states, self.transitions, self.initial);
        let unreachable: Vec<&str> = definition
            .unreachable_states()
            .iter()
            .map(|s| s.name())
            .collect();
        if !unreachable.is_empty() {
            warn!(
                states = ?unreachable,
                "states are not reachable from the initial state"
            );
        }
        Ok(definition)
    }
}

impl<C: Entity> Default for StateMachineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
