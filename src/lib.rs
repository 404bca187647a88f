//! Entity Machine: typed entity state machines with replayable transitions.
//!
//! A state machine is declared once per entity type: the reachable states,
//! the event kind each state accepts, and the directed transitions between
//! them. The runtime interpreter applies one event at a time to an immutable
//! entity snapshot and returns a new interpreter instance, a flag telling
//! whether a transition actually fired, and the signals the fired behavior
//! chose to emit: to the entity itself (driving further automatic
//! transitions) or to other entities (cross-entity causality). Persistence,
//! signal delivery, and code generation are external collaborators; this
//! crate defines the transition graph and the in-memory contract for
//! applying one event and harvesting signals.
//!
//! # Core Concepts
//!
//! - **Entity**: a serializable domain value with a stable identity
//! - **Event**: a tagged enumeration; the kind tag drives transition matching
//! - **State**: a named node declaring the event kind that causes entry into it
//! - **Signal**: a typed message emitted by a transition, routed to self or
//!   to another entity
//!
//! # Example
//!
//! ```rust
//! use entity_machine::{
//!     behavior, event_enum, unchanged, BehaviorError, Entity,
//!     EntityStateMachine, StateMachineBuilder,
//! };
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! event_enum! {
//!     pub enum OrderEvent kinds OrderEventKind {
//!         Create { customer: String },
//!         PlaceOrder { address: String },
//!     }
//! }
//!
//! #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
//! struct Order {
//!     id: String,
//!     customer: String,
//!     address: Option<String>,
//! }
//!
//! impl Entity for Order {
//!     type Id = String;
//!     type Event = OrderEvent;
//!
//!     fn id(&self) -> &String {
//!         &self.id
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = StateMachineBuilder::<Order>::new();
//! let created = builder.state("Created", OrderEventKind::Create)?;
//! let ordered = builder.state("Ordered", OrderEventKind::PlaceOrder)?;
//!
//! builder.initial_transition(&created, unchanged())?;
//! builder.transition(
//!     &created,
//!     &ordered,
//!     behavior(|order: &Order, event, _signals| {
//!         let address = match event {
//!             OrderEvent::PlaceOrder { address } => address.clone(),
//!             _ => return Err(BehaviorError::new("unexpected event")),
//!         };
//!         Ok(Order {
//!             address: Some(address),
//!             ..order.clone()
//!         })
//!     }),
//! )?;
//!
//! let definition = Arc::new(builder.build()?);
//!
//! let order = Order {
//!     id: "o-1".to_string(),
//!     customer: "Ada".to_string(),
//!     address: None,
//! };
//! let machine = EntityStateMachine::restore(Arc::clone(&definition), order, "Created")?;
//! let machine = machine.event(OrderEvent::PlaceOrder {
//!     address: "1 Main St".to_string(),
//! })?;
//!
//! assert!(machine.transition_occurred());
//! assert_eq!(machine.state().name(), "Ordered");
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod definition;
pub mod runtime;
pub mod signal;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    behavior, unchanged, BehaviorError, Entity, Event, EventKind, KindOf, TransitionBehavior,
};
pub use crate::definition::{
    DefinitionError, State, StateMachineBuilder, StateMachineDefinition, Transition,
    INITIAL_STATE_NAME,
};
pub use crate::runtime::{EntityStateMachine, EventError, TransitionLog, TransitionRecord};
pub use crate::signal::{EntityRef, EventEnvelope, Route, Signal, SignalEmitter, SignalError};
pub use crate::snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};
