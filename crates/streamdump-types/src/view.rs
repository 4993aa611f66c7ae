//! Rendered view output.
//!
//! A `StreamdumpView` is what a renderer draws: visible nodes in producer
//! before consumer order, and at most one edge per (source, target) pair.

use serde::{Deserialize, Serialize};

/// The currently visible subgraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamdumpView {
    pub nodes: Vec<NodeDescriptor>,
    pub edges: Vec<EdgeDescriptor>,
}

impl StreamdumpView {
    /// Get a node descriptor by display id
    pub fn node(&self, id: &str) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Get the edge between two display ids, if visible
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&EdgeDescriptor> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }
}

// ============================================================================
// NODES
// ============================================================================

/// A visible node: either a codec or a function graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeDescriptor {
    Codec(CodecNodeDescriptor),
    Graph(GraphNodeDescriptor),
}

impl NodeDescriptor {
    pub fn id(&self) -> &str {
        match self {
            NodeDescriptor::Codec(c) => &c.id,
            NodeDescriptor::Graph(g) => &g.id,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        match self {
            NodeDescriptor::Codec(c) => c.collapsed,
            NodeDescriptor::Graph(g) => g.collapsed,
        }
    }

    pub fn in_largest_path(&self) -> bool {
        match self {
            NodeDescriptor::Codec(c) => c.in_largest_path,
            NodeDescriptor::Graph(g) => g.in_largest_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecNodeDescriptor {
    /// Display id, e.g. `C3`
    pub id: String,
    pub name: String,
    /// `Standard` or `Custom`
    pub kind: String,
    pub type_id: u32,
    pub header_size: u64,
    /// `<name> (<type id>) (<id>)`
    pub header: String,
    /// `<kind> | <header size>`
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owning_graph: Option<String>,
    /// Placeholder codec for a trace that stopped mid-compression
    pub in_progress: bool,
    pub store: bool,
    pub has_local_params: bool,
    pub visible: bool,
    pub collapsed: bool,
    /// Has outputs, so collapse/expand applies
    pub collapsible: bool,
    pub expandable_one_level: bool,
    pub in_largest_path: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNodeDescriptor {
    /// Display id, e.g. `G1`
    pub id: String,
    pub name: String,
    /// `Standard`, `Static`, `Selector`, ...
    pub graph_type: String,
    pub header: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
    pub codec_ids: Vec<String>,
    pub has_local_params: bool,
    pub visible: bool,
    pub collapsed: bool,
    pub in_largest_path: bool,
}

// ============================================================================
// EDGES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescriptor {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub in_largest_path: bool,
    /// Every traced stream this edge stands for (more than one when coalesced)
    pub stream_ids: Vec<String>,
    pub coalesced: bool,
}
