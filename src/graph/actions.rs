//! User gestures dispatched against the graph.
//!
//! Text forms, as accepted by the CLI:
//!
//! | Action | Text |
//! |--------|------|
//! | `ToggleCollapse(C3)` | `toggle:C3` |
//! | `ToggleCollapse(G1)` | `toggle:G1` |
//! | `ExpandOneLevel(C1)` | `expand:C1` |
//! | `HideGraph(G2)` | `hide:G2` |
//! | `ToggleAllStandard(true)` | `standard:collapse` |

use super::StreamdumpGraph;
use crate::error::LookupInvariantViolation;
use crate::model::{CodecId, GraphId, NodeId, ParseNodeIdError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAction {
    /// Codec: collapse/expand its subgraph. Graph: collapse/expand the graph.
    ToggleCollapse(NodeId),
    ExpandOneLevel(CodecId),
    /// Hide a graph and everything downstream, or restore it
    HideGraph(GraphId),
    /// `true` collapses every visible standard graph, `false` restores them
    ToggleAllStandard(bool),
}

impl fmt::Display for ViewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewAction::ToggleCollapse(node) => write!(f, "toggle:{node}"),
            ViewAction::ExpandOneLevel(codec) => write!(f, "expand:{codec}"),
            ViewAction::HideGraph(graph) => write!(f, "hide:{graph}"),
            ViewAction::ToggleAllStandard(true) => f.write_str("standard:collapse"),
            ViewAction::ToggleAllStandard(false) => f.write_str("standard:expand"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseActionError {
    #[error("invalid action '{0}': expected <verb>:<target>")]
    MissingTarget(String),

    #[error("unknown action verb '{0}' (expected toggle, expand, hide or standard)")]
    UnknownVerb(String),

    #[error(transparent)]
    NodeId(#[from] ParseNodeIdError),

    #[error("'{verb}' expects a {expected} id, got {got}")]
    WrongKind {
        verb: String,
        expected: &'static str,
        got: NodeId,
    },

    #[error("standard expects 'collapse' or 'expand', got '{0}'")]
    StandardMode(String),
}

impl FromStr for ViewAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, target) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| ParseActionError::MissingTarget(s.to_string()))?;
        let verb = verb.trim().to_ascii_lowercase();

        let wrong_kind = |expected: &'static str, got: NodeId| ParseActionError::WrongKind {
            verb: verb.clone(),
            expected,
            got,
        };

        match verb.as_str() {
            "toggle" => Ok(ViewAction::ToggleCollapse(target.parse()?)),
            "expand" => {
                let node: NodeId = target.parse()?;
                node.as_codec()
                    .map(ViewAction::ExpandOneLevel)
                    .ok_or_else(|| wrong_kind("codec", node))
            }
            "hide" => {
                let node: NodeId = target.parse()?;
                node.as_graph()
                    .map(ViewAction::HideGraph)
                    .ok_or_else(|| wrong_kind("graph", node))
            }
            "standard" => match target.trim() {
                "collapse" => Ok(ViewAction::ToggleAllStandard(true)),
                "expand" => Ok(ViewAction::ToggleAllStandard(false)),
                other => Err(ParseActionError::StandardMode(other.to_string())),
            },
            _ => Err(ParseActionError::UnknownVerb(verb)),
        }
    }
}

impl StreamdumpGraph {
    /// Apply one gesture and return the nodes to focus.
    ///
    /// `ToggleAllStandard` focuses the graphs it toggled.
    pub fn apply(&mut self, action: ViewAction) -> Result<Vec<NodeId>, LookupInvariantViolation> {
        tracing::debug!(%action, "applying view action");
        match action {
            ViewAction::ToggleCollapse(NodeId::Codec(codec)) => self.toggle_subgraph_collapse(codec),
            ViewAction::ToggleCollapse(NodeId::Graph(graph)) => self.toggle_graph_collapse(graph),
            ViewAction::ExpandOneLevel(codec) => self.expand_one_level(codec),
            ViewAction::HideGraph(graph) => self.toggle_graph_hide(graph),
            ViewAction::ToggleAllStandard(collapse) => Ok(self
                .toggle_all_standard_graphs(collapse)
                .into_iter()
                .map(NodeId::Graph)
                .collect()),
        }
    }
}
