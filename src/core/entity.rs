//! Type contracts for entities and the events that drive them.
//!
//! An entity is a domain value with a stable identity whose behavior is
//! governed by a state machine. Each entity type declares exactly one tagged
//! event enumeration; transition matching works on the event's kind tag, so
//! the event types a state accepts are fixed when the definition is built.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait for domain entities governed by a state machine.
///
/// # Required Traits
///
/// - `Clone`: entities are immutable snapshots; the interpreter clones rather
///   than mutates
/// - `PartialEq`: entities must be comparable so no-op results can be checked
/// - `Debug`: entities must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: entities cross the persistence boundary as
///   snapshots
///
/// # Example
///
/// ```rust
/// use entity_machine::core::{Entity, Event, EventKind};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// struct Account {
///     id: String,
///     balance: i64,
/// }
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum AccountEvent {
///     Open,
///     Deposit { amount: i64 },
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum AccountEventKind {
///     Open,
///     Deposit,
/// }
///
/// impl EventKind for AccountEventKind {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Open => "Open",
///             Self::Deposit => "Deposit",
///         }
///     }
/// }
///
/// impl Event for AccountEvent {
///     type Kind = AccountEventKind;
///
///     fn kind(&self) -> AccountEventKind {
///         match self {
///             Self::Open => AccountEventKind::Open,
///             Self::Deposit { .. } => AccountEventKind::Deposit,
///         }
///     }
/// }
///
/// impl Entity for Account {
///     type Id = String;
///     type Event = AccountEvent;
///
///     fn id(&self) -> &String {
///         &self.id
///     }
/// }
/// ```
pub trait Entity:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Stable identity of the entity.
    ///
    /// `Display` is required so signal targets can carry a rendered identity.
    type Id: Clone + Eq + Hash + Debug + Display + Send + Sync;

    /// The tagged event enumeration this entity type consumes.
    type Event: Event;

    /// Get the entity's identity.
    fn id(&self) -> &Self::Id;
}

/// Trait for the event enumeration of an entity type.
///
/// Events are plain values; the interpreter never inspects their contents,
/// only their [`kind`](Event::kind) tag. The payload is handed untouched to
/// the matched transition's behavior.
pub trait Event: Clone + Debug + Send + Sync + 'static {
    /// Tag type identifying the event variant.
    type Kind: EventKind;

    /// The variant tag used for transition matching.
    fn kind(&self) -> Self::Kind;
}

/// Trait for event kind tags.
///
/// Kinds are cheap copyable tags bound to states at definition-construction
/// time. The [`name`](EventKind::name) is used only by the documentation and
/// graph projections, never for matching.
pub trait EventKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the kind's name for display in projections.
    fn name(&self) -> &'static str;
}

/// Event kind tag type of an entity.
pub type KindOf<C> = <<C as Entity>::Event as Event>::Kind;
