//! View models wrapping the immutable entities.
//!
//! Entities never change after construction; the view models carry the only
//! mutable state: a node's visibility/collapse state and the largest-path
//! highlight.

use crate::model::{CodecId, EdgeId, GraphId, NodeId, StreamId};

// =============================================================================
// NODE STATE
// =============================================================================

/// Visibility and collapse state of one node.
///
/// Hidden nodes remember whether they were collapsed, so revealing them later
/// restores the collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeState {
    #[default]
    Expanded,
    /// Visible and collapsed
    Collapsed,
    HiddenExpanded,
    HiddenCollapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTransition {
    Show,
    Hide,
    Collapse,
    Expand,
}

impl NodeState {
    pub fn apply(self, transition: NodeTransition) -> NodeState {
        use NodeState::*;
        use NodeTransition::*;

        match (self, transition) {
            (Expanded | HiddenExpanded, Show) => Expanded,
            (Collapsed | HiddenCollapsed, Show) => Collapsed,
            (Expanded | HiddenExpanded, Hide) => HiddenExpanded,
            (Collapsed | HiddenCollapsed, Hide) => HiddenCollapsed,
            (Expanded | Collapsed, Collapse) => Collapsed,
            (HiddenExpanded | HiddenCollapsed, Collapse) => HiddenCollapsed,
            (Expanded | Collapsed, Expand) => Expanded,
            (HiddenExpanded | HiddenCollapsed, Expand) => HiddenExpanded,
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, NodeState::Expanded | NodeState::Collapsed)
    }

    pub fn is_collapsed(self) -> bool {
        matches!(self, NodeState::Collapsed | NodeState::HiddenCollapsed)
    }
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CodecNode {
    pub codec: CodecId,
    pub state: NodeState,
    pub in_largest_path: bool,
}

impl CodecNode {
    pub(crate) fn new(codec: CodecId) -> Self {
        Self {
            codec,
            state: NodeState::Expanded,
            in_largest_path: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    pub fn is_collapsed(&self) -> bool {
        self.state.is_collapsed()
    }

    pub(crate) fn transition(&mut self, transition: NodeTransition) {
        self.state = self.state.apply(transition);
    }
}

/// A function graph node with its boundary-crossing proxy edges.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub graph: GraphId,
    pub state: NodeState,
    pub in_largest_path: bool,
    pub(crate) incoming: Vec<EdgeSlot>,
    pub(crate) outgoing: Vec<EdgeSlot>,
}

impl GraphNode {
    pub(crate) fn new(graph: GraphId) -> Self {
        Self {
            graph,
            state: NodeState::Expanded,
            in_largest_path: false,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    pub fn is_collapsed(&self) -> bool {
        self.state.is_collapsed()
    }

    pub(crate) fn transition(&mut self, transition: NodeTransition) {
        self.state = self.state.apply(transition);
    }
}

// =============================================================================
// EDGES
// =============================================================================

/// Position of an edge in the graph's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EdgeSlot(pub(crate) usize);

/// A real stream edge or a proxy standing in for one.
///
/// Traced metrics are read from the stream it represents.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeView {
    pub id: EdgeId,
    pub stream: StreamId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
    pub in_largest_path: bool,
}

impl EdgeView {
    pub fn is_proxy(&self) -> bool {
        self.id.is_proxy()
    }
}
