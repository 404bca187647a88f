//! The runtime interpreter for entity state machines.

use crate::core::{BehaviorError, Entity, Event, EventKind, KindOf};
use crate::definition::{State, StateMachineDefinition};
use crate::runtime::log::{TransitionLog, TransitionRecord};
use crate::signal::{EventEnvelope, Signal, SignalEmitter};
use crate::snapshot::{Snapshot, SnapshotError};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors surfaced by [`EntityStateMachine::event`].
///
/// An event with no matching transition is deliberately *not* an error: it
/// yields a no-op result so at-least-once redelivery stays harmless.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("behavior for transition '{from}' -> '{to}' failed: {source}")]
    Behavior {
        from: String,
        to: String,
        #[source]
        source: BehaviorError,
    },
}

/// Executable counterpart of a [`StateMachineDefinition`]: applies one event
/// at a time to an entity snapshot.
///
/// Instances are immutable. [`event`](Self::event) never mutates the
/// receiver; it returns a fresh interpreter carrying the next entity value,
/// the next state, the outcome flag, and the signals the fired behavior
/// emitted. The flag and signal lists always describe the most recent call
/// only.
///
/// The interpreter is pure value-to-value with no suspension points, so
/// sharing a definition across concurrent workers is safe as long as each
/// worker holds exclusive authority over a given entity identity while
/// applying an event, a discipline owed by the dispatcher rather than
/// enforced here.
pub struct EntityStateMachine<C: Entity> {
    definition: Arc<StateMachineDefinition<C>>,
    entity: C,
    state: State<KindOf<C>>,
    transition_occurred: bool,
    signals_to_self: Vec<Signal<C::Event>>,
    signals_to_other: Vec<Signal<EventEnvelope>>,
    log: TransitionLog,
}

impl<C: Entity> std::fmt::Debug for EntityStateMachine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStateMachine")
            .field("entity", &self.entity)
            .field("state", &self.state.name())
            .field("transition_occurred", &self.transition_occurred)
            .field("signals_to_self", &self.signals_to_self.len())
            .field("signals_to_other", &self.signals_to_other.len())
            .finish()
    }
}

impl<C: Entity> EntityStateMachine<C> {
    /// Create an interpreter at the initial pseudo-state, ready for a
    /// creation event.
    pub fn new(definition: Arc<StateMachineDefinition<C>>, entity: C) -> Self {
        let state = definition.initial_state().clone();
        Self {
            definition,
            entity,
            state,
            transition_occurred: false,
            signals_to_self: Vec::new(),
            signals_to_other: Vec::new(),
            log: TransitionLog::new(),
        }
    }

    /// Reconstruct an interpreter from a persisted entity value and its
    /// current-state tag.
    pub fn restore(
        definition: Arc<StateMachineDefinition<C>>,
        entity: C,
        state_name: &str,
    ) -> Result<Self, SnapshotError> {
        let state = if state_name == definition.initial_state().name() {
            definition.initial_state().clone()
        } else {
            definition
                .state_named(state_name)
                .cloned()
                .ok_or_else(|| SnapshotError::UnknownState {
                    state: state_name.to_string(),
                })?
        };
        Ok(Self {
            definition,
            entity,
            state,
            transition_occurred: false,
            signals_to_self: Vec::new(),
            signals_to_other: Vec::new(),
            log: TransitionLog::new(),
        })
    }

    /// Reconstruct an interpreter from a [`Snapshot`], restoring its log.
    pub fn from_snapshot(
        definition: Arc<StateMachineDefinition<C>>,
        snapshot: Snapshot<C>,
    ) -> Result<Self, SnapshotError> {
        let mut machine = Self::restore(definition, snapshot.entity, &snapshot.state)?;
        machine.log = snapshot.log;
        Ok(machine)
    }

    /// Capture the interpreter's persistent portion for the storage
    /// collaborator.
    pub fn snapshot(&self) -> Snapshot<C> {
        Snapshot::new(self.state.name(), self.entity.clone(), self.log.clone())
    }

    /// Apply one event, producing a new interpreter instance.
    ///
    /// Looks up, in declaration order, the transition whose `from` equals
    /// the current state and whose target accepts the event's kind.
    ///
    /// - Found: the transition's behavior computes the next entity value and
    ///   may emit signals; the returned instance reports
    ///   `transition_occurred() == true` and stands at the transition's `to`
    ///   state. A behavior failure propagates as [`EventError::Behavior`]
    ///   and leaves the receiver untouched.
    /// - Not found: a silent no-op. Same state, same entity value,
    ///   `transition_occurred() == false`, empty signal lists.
    pub fn event(&self, event: C::Event) -> Result<Self, EventError> {
        let kind = event.kind();
        let Some(transition) = self.definition.transition_for(self.state.name(), kind) else {
            trace!(
                state = self.state.name(),
                event = kind.name(),
                "no matching transition"
            );
            return Ok(Self {
                definition: Arc::clone(&self.definition),
                entity: self.entity.clone(),
                state: self.state.clone(),
                transition_occurred: false,
                signals_to_self: Vec::new(),
                signals_to_other: Vec::new(),
                log: self.log.clone(),
            });
        };

        let mut signals = SignalEmitter::new();
        let next_entity =
            (transition.behavior)(&self.entity, &event, &mut signals).map_err(|source| {
                EventError::Behavior {
                    from: transition.from.name().to_string(),
                    to: transition.to.name().to_string(),
                    source,
                }
            })?;

        debug!(
            from = transition.from.name(),
            to = transition.to.name(),
            event = kind.name(),
            "transition fired"
        );
        let record = TransitionRecord {
            from: transition.from.name().to_string(),
            to: transition.to.name().to_string(),
            event: kind.name().to_string(),
            timestamp: Utc::now(),
        };
        let (signals_to_self, signals_to_other) = signals.into_parts();
        Ok(Self {
            definition: Arc::clone(&self.definition),
            entity: next_entity,
            state: transition.to.clone(),
            transition_occurred: true,
            signals_to_self,
            signals_to_other,
            log: self.log.record(record),
        })
    }

    /// Whether the most recent [`event`](Self::event) call fired a
    /// transition.
    pub fn transition_occurred(&self) -> bool {
        self.transition_occurred
    }

    /// Signals from the most recent call routed back to this entity, in
    /// emission order.
    pub fn signals_to_self(&self) -> &[Signal<C::Event>] {
        &self.signals_to_self
    }

    /// Signals from the most recent call routed to other entities, in
    /// emission order.
    pub fn signals_to_other(&self) -> &[Signal<EventEnvelope>] {
        &self.signals_to_other
    }

    /// The current entity value.
    pub fn entity(&self) -> &C {
        &self.entity
    }

    /// The current state.
    pub fn state(&self) -> &State<KindOf<C>> {
        &self.state
    }

    /// The governing definition.
    pub fn definition(&self) -> &StateMachineDefinition<C> {
        &self.definition
    }

    /// Log of every transition fired since construction or restore.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }
}
