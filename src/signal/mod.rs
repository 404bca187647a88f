//! Signals: typed messages emitted by transition behaviors.
//!
//! A signal is a transient envelope produced as an output of applying an
//! event: a payload event plus a destination. Signals routed back to the
//! emitting entity stay fully typed; signals crossing an entity-type boundary
//! carry a type-erased payload the receiving side recovers with a checked
//! downcast. The core only tags and returns signals in emission order;
//! delivery, ordering across entities, and retry belong to the dispatcher.

mod error;

pub use error::SignalError;

use crate::core::{Entity, Event};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Routing class of a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Loop back to the emitting entity. The dispatcher is expected to
    /// re-enqueue these against the same entity identity before yielding
    /// control, enabling chains of automatic transitions.
    ToSelf,
    /// Deliver to a different entity's mailbox.
    ToOther,
}

/// Address of a signal's destination entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityRef {
    entity_type: &'static str,
    id: String,
}

impl EntityRef {
    /// Build a reference to the entity of type `T` with the given identity.
    ///
    /// Fails fast with [`SignalError::MissingTargetId`] when the rendered
    /// identity is empty.
    pub fn of<T: Entity>(id: &T::Id) -> Result<Self, SignalError> {
        let rendered = id.to_string();
        if rendered.is_empty() {
            return Err(SignalError::MissingTargetId {
                entity_type: type_name::<T>(),
            });
        }
        Ok(Self {
            entity_type: type_name::<T>(),
            id: rendered,
        })
    }

    /// Type name of the destination entity.
    pub fn entity_type(&self) -> &'static str {
        self.entity_type
    }

    /// Rendered identity of the destination entity.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Type-erased event payload addressed to another entity type.
///
/// The receiving side recovers the typed event with
/// [`downcast`](EventEnvelope::downcast); the envelope does not define a wire
/// format.
#[derive(Clone)]
pub struct EventEnvelope {
    event_type: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl EventEnvelope {
    pub fn new<E: Event>(event: E) -> Self {
        Self {
            event_type: type_name::<E>(),
            payload: Arc::new(event),
        }
    }

    /// Type name of the enclosed event.
    pub fn event_type(&self) -> &'static str {
        self.event_type
    }

    /// Recover the typed event; `None` when `E` is not the payload type.
    pub fn downcast<E: Event>(&self) -> Option<&E> {
        self.payload.downcast_ref::<E>()
    }
}

impl fmt::Debug for EventEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEnvelope")
            .field("event_type", &self.event_type)
            .finish_non_exhaustive()
    }
}

/// A typed envelope: destination plus payload event.
///
/// `target` is `None` for the self-referential form: a signal the emitting
/// entity addresses to itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal<E> {
    target: Option<EntityRef>,
    event: E,
}

impl<E> Signal<E> {
    /// Signal routed back to the emitting entity.
    pub fn to_self(event: E) -> Self {
        Self {
            target: None,
            event,
        }
    }

    /// Signal routed to the given destination.
    pub fn to_entity(target: EntityRef, event: E) -> Self {
        Self {
            target: Some(target),
            event,
        }
    }

    /// The signal's routing class.
    pub fn route(&self) -> Route {
        if self.target.is_none() {
            Route::ToSelf
        } else {
            Route::ToOther
        }
    }

    /// Destination; `None` for self-signals.
    pub fn target(&self) -> Option<&EntityRef> {
        self.target.as_ref()
    }

    /// The payload event.
    pub fn event(&self) -> &E {
        &self.event
    }

    /// Consume the signal, yielding the payload event.
    pub fn into_event(self) -> E {
        self.event
    }
}

/// Collects the signals a transition behavior chooses to emit.
///
/// Signals are partitioned strictly by routing class at emission time, and
/// each class preserves its emission order; the runtime hands both lists to
/// the dispatcher untouched.
pub struct SignalEmitter<C: Entity> {
    self_signals: Vec<Signal<C::Event>>,
    other_signals: Vec<Signal<EventEnvelope>>,
}

impl<C: Entity> SignalEmitter<C> {
    pub(crate) fn new() -> Self {
        Self {
            self_signals: Vec::new(),
            other_signals: Vec::new(),
        }
    }

    /// Queue an event for redelivery to the emitting entity itself.
    pub fn to_self(&mut self, event: C::Event) {
        self.self_signals.push(Signal::to_self(event));
    }

    /// Queue an event for another entity's mailbox.
    ///
    /// Fails fast when the rendered target identity is empty; the signal is
    /// not recorded.
    pub fn to_entity<T: Entity>(&mut self, id: &T::Id, event: T::Event) -> Result<(), SignalError> {
        let target = EntityRef::of::<T>(id)?;
        self.other_signals
            .push(Signal::to_entity(target, EventEnvelope::new(event)));
        Ok(())
    }

    /// Total number of signals emitted so far, across both routing classes.
    pub fn emitted(&self) -> usize {
        self.self_signals.len() + self.other_signals.len()
    }

    pub(crate) fn into_parts(self) -> (Vec<Signal<C::Event>>, Vec<Signal<EventEnvelope>>) {
        (self.self_signals, self.other_signals)
    }
}
