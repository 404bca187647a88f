//! Directed-graph projection for external visualization tooling.
//!
//! Nodes are states (labeled with the accepted event kind), edges are
//! transitions. Reporting only; has no effect on transition semantics.

use crate::core::{Entity, EventKind};
use crate::definition::StateMachineDefinition;
use std::fmt::Write;

/// A node of the graph projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    name: String,
    label: String,
}

impl GraphNode {
    /// The node's identifier: the state name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label: the state name plus its accepted event kind.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A directed edge of the graph projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    source: String,
    target: String,
}

impl GraphEdge {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Directed graph of a definition: nodes are states, edges are transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Graph {
    /// Nodes, sorted by state name.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges, in transition declaration order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Render the graph as GraphML.
    pub fn to_graphml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str("<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">\n");
        out.push_str("  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>\n");
        out.push_str("  <graph id=\"G\" edgedefault=\"directed\">\n");
        for node in &self.nodes {
            let _ = writeln!(
                out,
                "    <node id=\"{}\"><data key=\"label\">{}</data></node>",
                escape_xml(&node.name),
                escape_xml(&node.label)
            );
        }
        for edge in &self.edges {
            let _ = writeln!(
                out,
                "    <edge source=\"{}\" target=\"{}\"/>",
                escape_xml(&edge.source),
                escape_xml(&edge.target)
            );
        }
        out.push_str("  </graph>\n");
        out.push_str("</graphml>\n");
        out
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl<C: Entity> StateMachineDefinition<C> {
    /// The directed-graph projection of this definition.
    pub fn graph(&self) -> Graph {
        let mut nodes: Vec<GraphNode> = self
            .states()
            .map(|state| GraphNode {
                name: state.name().to_string(),
                label: match state.accepted() {
                    Some(kind) => format!("{}\n[{}]", state.name(), kind.name()),
                    None => state.name().to_string(),
                },
            })
            .collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));

        let edges = self
            .transitions()
            .iter()
            .map(|t| GraphEdge {
                source: t.from.name().to_string(),
                target: t.to.name().to_string(),
            })
            .collect();

        Graph { nodes, edges }
    }

    /// GraphML rendering of [`graph`](Self::graph).
    pub fn graphml(&self) -> String {
        self.graph().to_graphml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{unchanged, Entity, Event, EventKind};
    use crate::definition::StateMachineBuilder;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Device {
        id: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum DeviceEvent {
        Provision,
        Activate,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum DeviceEventKind {
        Provision,
        Activate,
    }

    impl EventKind for DeviceEventKind {
        fn name(&self) -> &'static str {
            match self {
                Self::Provision => "Provision",
                Self::Activate => "Activate",
            }
        }
    }

    impl Event for DeviceEvent {
        type Kind = DeviceEventKind;

        fn kind(&self) -> DeviceEventKind {
            match self {
                Self::Provision => DeviceEventKind::Provision,
                Self::Activate => DeviceEventKind::Activate,
            }
        }
    }

    impl Entity for Device {
        type Id = String;
        type Event = DeviceEvent;

        fn id(&self) -> &String {
            &self.id
        }
    }

    fn definition() -> crate::definition::StateMachineDefinition<Device> {
        let mut builder = StateMachineBuilder::<Device>::new();
        let provisioned = builder
            .state("Provisioned", DeviceEventKind::Provision)
            .unwrap();
        let active = builder.state("Active", DeviceEventKind::Activate).unwrap();
        builder
            .initial_transition(&provisioned, unchanged())
            .unwrap();
        builder
            .transition(&provisioned, &active, unchanged())
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn graph_contains_all_states_and_transitions() {
        let graph = definition().graph();

        let names: Vec<&str> = graph.nodes().iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["Active", "Initial", "Provisioned"]);

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edges()[0].source(), "Initial");
        assert_eq!(graph.edges()[0].target(), "Provisioned");
    }

    #[test]
    fn node_labels_carry_accepted_kind() {
        let graph = definition().graph();
        let active = graph.nodes().iter().find(|n| n.name() == "Active").unwrap();
        assert_eq!(active.label(), "Active\n[Activate]");

        let initial = graph.nodes().iter().find(|n| n.name() == "Initial").unwrap();
        assert_eq!(initial.label(), "Initial");
    }

    #[test]
    fn graphml_is_well_formed() {
        let graphml = definition().graphml();

        assert!(graphml.starts_with("<?xml"));
        assert!(graphml.contains("<node id=\"Provisioned\">"));
        assert!(graphml.contains("<edge source=\"Provisioned\" target=\"Active\"/>"));
        assert!(graphml.ends_with("</graphml>\n"));
    }

    #[test]
    fn xml_special_characters_are_escaped() {
        assert_eq!(escape_xml("A&B <C>"), "A&amp;B &lt;C&gt;");
        assert_eq!(escape_xml("say \"hi\""), "say &quot;hi&quot;");
    }
}
