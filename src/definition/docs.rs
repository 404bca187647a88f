//! Documentation projection of a definition.
//!
//! Reporting only, consumed by the code-generation collaborator; has no
//! effect on transition semantics.

use crate::core::{Entity, EventKind};
use crate::definition::StateMachineDefinition;
use std::fmt::Write;

impl<C: Entity> StateMachineDefinition<C> {
    /// HTML documentation projection: registered states sorted by name,
    /// then the distinct sorted accepted event kinds of non-initial states.
    pub fn documentation_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<html>\n<body>\n");

        out.push_str("<h2>States</h2>\n");
        let mut names: Vec<&str> = self.states().map(|s| s.name()).collect();
        names.sort_unstable();
        for name in names {
            let _ = writeln!(out, "<p class=\"state\"><b>{name}</b></p>");
        }

        out.push_str("<h2>Events</h2>\n");
        let mut events: Vec<&'static str> = self
            .states()
            .filter(|s| !s.is_initial())
            .filter_map(|s| s.accepted())
            .map(|k| k.name())
            .collect();
        events.sort_unstable();
        events.dedup();
        for event in events {
            let _ = writeln!(out, "<p class=\"event\"><i>{event}</i></p>");
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}
