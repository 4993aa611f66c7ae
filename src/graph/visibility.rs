//! Collapse/expand operations.
//!
//! Public operations validate every id they need before touching state, then
//! run an infallible `*_unchecked` body. Each returns the focus list: the
//! nodes a renderer should pan to after the change.

use super::traversal::Descent;
use super::view_model::NodeTransition;
use super::StreamdumpGraph;
use crate::error::LookupInvariantViolation;
use crate::model::{CodecId, GraphId, NodeId};

type FocusResult = Result<Vec<NodeId>, LookupInvariantViolation>;

fn push_unique(focus: &mut Vec<NodeId>, node: NodeId) {
    if !focus.contains(&node) {
        focus.push(node);
    }
}

impl StreamdumpGraph {
    // =========================================================================
    // CODEC SUBGRAPHS
    // =========================================================================

    /// Collapse or expand everything downstream of `codec`.
    ///
    /// Expanding reveals descendants up to (and including) collapsed ones; a
    /// descendant inside a collapsed graph reveals the graph node instead.
    /// Collapsing hides every descendant. Graphs of hidden descendants are
    /// hidden when collapsed, or when none of their codecs remain visible.
    pub fn toggle_subgraph_collapse(&mut self, codec: CodecId) -> FocusResult {
        self.check_codec(codec)?;
        Ok(self.toggle_subgraph_collapse_unchecked(codec))
    }

    pub(crate) fn toggle_subgraph_collapse_unchecked(&mut self, codec: CodecId) -> Vec<NodeId> {
        if self.codec_collapsed(codec) {
            self.expand_subgraph(codec)
        } else {
            self.collapse_subgraph(codec)
        }
    }

    fn expand_subgraph(&mut self, codec: CodecId) -> Vec<NodeId> {
        self.transition_codec(codec, NodeTransition::Expand);

        let mut focus = Vec::new();
        for child in self.descendants(codec, Descent::StopAtCollapsed) {
            match self.owning_graph(child) {
                Some(graph) => {
                    self.transition_graph(graph, NodeTransition::Show);
                    if self.graph_collapsed(graph) {
                        push_unique(&mut focus, graph.into());
                    } else {
                        self.transition_codec(child, NodeTransition::Show);
                        focus.push(child.into());
                    }
                }
                None => {
                    self.transition_codec(child, NodeTransition::Show);
                    focus.push(child.into());
                }
            }
        }

        focus.push(codec.into());
        tracing::debug!(%codec, revealed = focus.len() - 1, "expanded subgraph");
        focus
    }

    fn collapse_subgraph(&mut self, codec: CodecId) -> Vec<NodeId> {
        self.transition_codec(codec, NodeTransition::Collapse);

        let hidden = self.descendants(codec, Descent::Unbounded);
        let mut graphs_to_check: Vec<GraphId> = Vec::new();
        for &child in &hidden {
            if let Some(graph) = self.owning_graph(child) {
                if self.graph_collapsed(graph) {
                    self.transition_graph(graph, NodeTransition::Hide);
                } else if !graphs_to_check.contains(&graph) {
                    graphs_to_check.push(graph);
                }
            }
            self.transition_codec(child, NodeTransition::Hide);
        }

        for graph in graphs_to_check {
            let all_hidden = self
                .store
                .graph(graph)
                .is_some_and(|g| g.codecs.iter().all(|&c| !self.codec_visible(c)));
            if all_hidden {
                self.transition_graph(graph, NodeTransition::Hide);
            }
        }

        tracing::debug!(%codec, hidden = hidden.len(), "collapsed subgraph");
        vec![codec.into()]
    }

    /// Expand `codec` and reveal only its direct children.
    ///
    /// A child owned by a different graph reveals that graph, collapsed.
    /// Children with children of their own are pre-collapsed.
    pub fn expand_one_level(&mut self, codec: CodecId) -> FocusResult {
        self.check_codec(codec)?;
        Ok(self.expand_one_level_unchecked(codec))
    }

    fn expand_one_level_unchecked(&mut self, codec: CodecId) -> Vec<NodeId> {
        self.transition_codec(codec, NodeTransition::Expand);
        let mut focus = vec![codec.into()];

        let my_graph = self.owning_graph(codec);
        let children = self.dag.children_of(codec).to_vec();
        for child in children {
            match self.owning_graph(child) {
                Some(graph) if Some(graph) != my_graph => {
                    self.transition_graph(graph, NodeTransition::Show);
                    self.transition_graph(graph, NodeTransition::Collapse);
                    push_unique(&mut focus, graph.into());
                }
                _ => {
                    self.transition_codec(child, NodeTransition::Show);
                    focus.push(child.into());
                }
            }
            if self.dag.has_children(child) {
                self.transition_codec(child, NodeTransition::Collapse);
            }
        }

        focus
    }

    // =========================================================================
    // FUNCTION GRAPHS
    // =========================================================================

    /// Collapse a graph into a single node, or expand it again.
    ///
    /// Expanding re-displays codecs reachable from the first codec through
    /// children owned by the same graph, stopping at collapsed codecs.
    pub fn toggle_graph_collapse(&mut self, graph: GraphId) -> FocusResult {
        self.check_graph(graph)?;
        if !self.graph_collapsed(graph) {
            return Ok(self.collapse_graph_unchecked(graph));
        }
        let first = self.first_codec_of(graph)?;
        Ok(self.expand_graph_unchecked(graph, first))
    }

    fn collapse_graph_unchecked(&mut self, graph: GraphId) -> Vec<NodeId> {
        self.transition_graph(graph, NodeTransition::Collapse);
        let owned = self
            .store
            .graph(graph)
            .map(|g| g.codecs.clone())
            .unwrap_or_default();
        for codec in owned {
            self.transition_codec(codec, NodeTransition::Hide);
        }
        vec![graph.into()]
    }

    fn expand_graph_unchecked(&mut self, graph: GraphId, first: CodecId) -> Vec<NodeId> {
        self.transition_graph(graph, NodeTransition::Expand);
        self.transition_codec(first, NodeTransition::Show);
        let mut focus = vec![first.into()];

        if !self.codec_collapsed(first) {
            for codec in self.descendants(first, Descent::WithinGraph(graph)) {
                self.transition_codec(codec, NodeTransition::Show);
                focus.push(codec.into());
            }
        }
        focus
    }

    /// Hide a graph together with everything downstream of it, or restore it.
    ///
    /// Works through the subgraph of the graph's first codec: hiding collapses
    /// that subgraph, then collapses the graph and hides the first codec so
    /// the graph node stands in for all of it.
    pub fn toggle_graph_hide(&mut self, graph: GraphId) -> FocusResult {
        let first = self.first_codec_of(graph)?;
        Ok(self.toggle_graph_hide_unchecked(graph, first))
    }

    pub(crate) fn toggle_graph_hide_unchecked(
        &mut self,
        graph: GraphId,
        first: CodecId,
    ) -> Vec<NodeId> {
        if self.graph_collapsed(graph) {
            // expand the graph first so the walk reveals its codecs
            self.transition_graph(graph, NodeTransition::Expand);
            self.transition_graph(graph, NodeTransition::Show);
            let mut focus = if self.codec_collapsed(first) {
                self.expand_subgraph(first)
            } else {
                // a plain graph collapse hid the owned codecs
                let owned = self.descendants(first, Descent::WithinGraph(graph));
                for &codec in &owned {
                    self.transition_codec(codec, NodeTransition::Show);
                }
                owned.into_iter().map(NodeId::Codec).collect()
            };
            self.transition_codec(first, NodeTransition::Show);
            push_unique(&mut focus, first.into());
            focus.push(graph.into());
            focus
        } else {
            if !self.codec_collapsed(first) {
                self.collapse_subgraph(first);
            }
            self.transition_graph(graph, NodeTransition::Collapse);
            self.transition_codec(first, NodeTransition::Hide);
            vec![graph.into()]
        }
    }

    /// `toggle_graph_hide` on every visible standard graph whose collapse
    /// state differs from `collapse`, in graph id order. Returns the graphs
    /// that were toggled.
    pub fn toggle_all_standard_graphs(&mut self, collapse: bool) -> Vec<GraphId> {
        let mut toggled = Vec::new();
        for idx in 0..self.graph_nodes.len() {
            let graph = GraphId::from_index(idx);
            // earlier toggles may have hidden or revealed this graph
            if !self.graph_visible(graph) || self.graph_collapsed(graph) == collapse {
                continue;
            }
            let Some(first) = self
                .store
                .graph(graph)
                .filter(|g| g.is_standard())
                .and_then(|g| g.first_codec())
            else {
                continue;
            };
            self.toggle_graph_hide_unchecked(graph, first);
            toggled.push(graph);
        }
        tracing::debug!(collapse, toggled = toggled.len(), "toggled standard graphs");
        toggled
    }
}
