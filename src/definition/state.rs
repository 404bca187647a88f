//! State nodes of an entity's transition graph.

use crate::core::EventKind;

/// Reserved name of the synthesized initial pseudo-state.
pub const INITIAL_STATE_NAME: &str = "Initial";

/// A named node in an entity's transition graph.
///
/// Every ordinary state carries the event kind whose arrival causes entry
/// into it. The synthesized initial pseudo-state is the one state that
/// accepts no real event (`accepted()` returns `None`); it exists only as the
/// source of creation transitions.
///
/// States are owned by their definition and immutable after construction;
/// the values handed out by the builder are cheap clones usable as handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State<K: EventKind> {
    name: String,
    accepted: Option<K>,
    initial: bool,
}

impl<K: EventKind> State<K> {
    pub(crate) fn new(name: impl Into<String>, accepted: K) -> Self {
        Self {
            name: name.into(),
            accepted: Some(accepted),
            initial: false,
        }
    }

    pub(crate) fn initial() -> Self {
        Self {
            name: INITIAL_STATE_NAME.to_string(),
            accepted: None,
            initial: true,
        }
    }

    /// The state's name, unique within its owning definition.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Event kind whose arrival causes entry into this state.
    ///
    /// `None` only for the synthesized initial pseudo-state.
    pub fn accepted(&self) -> Option<K> {
        self.accepted
    }

    /// Whether this is the synthesized initial pseudo-state.
    pub fn is_initial(&self) -> bool {
        self.initial
    }
}
