//! The currently visible subgraph.

use super::proxy::ProxySide;
use super::view_model::EdgeSlot;
use super::StreamdumpGraph;
use crate::error::LookupInvariantViolation;
use crate::model::{CodecId, EdgeId, GraphId, NodeId, StreamId};
use std::collections::{HashMap, HashSet};

/// Visible nodes in DAG order plus one edge per (source, target) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleGraph {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<VisibleEdge>,
}

impl VisibleGraph {
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn edge_between(&self, source: NodeId, target: NodeId) -> Option<&VisibleEdge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    /// (source, target) pairs in emission order
    pub fn edge_pairs(&self) -> Vec<(NodeId, NodeId)> {
        self.edges.iter().map(|e| (e.source, e.target)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleEdge {
    /// Id of the first edge represented
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
    /// Every stream this edge stands for, in emission order
    pub streams: Vec<StreamId>,
    pub compressed_size: u64,
    pub share: f64,
    pub in_largest_path: bool,
}

impl VisibleEdge {
    pub fn is_coalesced(&self) -> bool {
        self.streams.len() > 1
    }
}

impl StreamdumpGraph {
    /// Walk codecs in DAG order and collect what is currently on screen.
    ///
    /// A visible graph node is emitted just before its first codec. For
    /// each output stream the edge is picked from the visibility of both
    /// codecs and their graphs: the real edge when both codecs show, a proxy
    /// when one side is behind a visible graph, nothing otherwise.
    pub fn visible_graph(&self) -> Result<VisibleGraph, LookupInvariantViolation> {
        let mut nodes: Vec<NodeId> = Vec::new();
        let mut seen_nodes: HashSet<NodeId> = HashSet::new();
        let mut slots: Vec<EdgeSlot> = Vec::new();
        let mut seen_slots: HashSet<EdgeSlot> = HashSet::new();

        for &codec_id in self.dag.dag_order() {
            let Some(codec) = self.store.codec(codec_id) else {
                continue;
            };
            let my_graph = codec.owning_graph.filter(|&g| self.graph_visible(g));
            let codec_visible = self.codec_visible(codec_id);

            if let Some(graph) = my_graph {
                if seen_nodes.insert(graph.into()) {
                    nodes.push(graph.into());
                }
            }
            if codec_visible && seen_nodes.insert(codec_id.into()) {
                nodes.push(codec_id.into());
            }

            for &stream in &codec.outputs {
                let Some((_, child)) = self.store.stream(stream).and_then(|s| s.endpoints()) else {
                    continue;
                };
                let slot = self.pick_edge(codec_id, codec_visible, my_graph, stream, child)?;
                if let Some(slot) = slot {
                    if seen_slots.insert(slot) {
                        slots.push(slot);
                    }
                }
            }
        }

        Ok(VisibleGraph {
            nodes,
            edges: self.coalesce(&slots),
        })
    }

    /// Edge to emit for `stream` from `codec` to `child`, if any.
    ///
    /// `my_graph` is the codec's owning graph when that graph is visible.
    fn pick_edge(
        &self,
        codec: CodecId,
        codec_visible: bool,
        my_graph: Option<GraphId>,
        stream: StreamId,
        child: CodecId,
    ) -> Result<Option<EdgeSlot>, LookupInvariantViolation> {
        let child_visible = self.codec_visible(child);
        let child_graph = self.owning_graph(child);
        let same_graph = child_graph.is_some() && child_graph == self.owning_graph(codec);
        // a visible graph on the far side of a boundary
        let child_boundary = child_graph.filter(|&g| !same_graph && self.graph_visible(g));

        if codec_visible {
            if child_visible {
                return Ok(self.stream_edges.get(&stream).copied());
            }
            if let Some(target_graph) = child_boundary {
                let slot =
                    self.find_proxy(target_graph, ProxySide::Incoming, codec.into(), stream)?;
                return Ok(Some(slot));
            }
            return Ok(None);
        }

        let Some(graph) = my_graph else {
            return Ok(None);
        };
        if child_visible {
            // internal edge whose source is hidden inside the graph
            if same_graph {
                return Ok(None);
            }
            let slot = self.find_proxy(graph, ProxySide::Outgoing, child.into(), stream)?;
            return Ok(Some(slot));
        }
        if let Some(target_graph) = child_boundary {
            let slot = self.find_proxy(target_graph, ProxySide::Incoming, graph.into(), stream)?;
            return Ok(Some(slot));
        }
        Ok(None)
    }

    /// Merge edges sharing a (source, target) pair, keeping first-seen order.
    fn coalesce(&self, slots: &[EdgeSlot]) -> Vec<VisibleEdge> {
        let mut merged: Vec<VisibleEdge> = Vec::new();
        let mut by_pair: HashMap<(NodeId, NodeId), usize> = HashMap::new();

        for slot in slots {
            let Some(edge) = self.edges.get(slot.0) else {
                continue;
            };
            let (size, share) = self
                .store
                .stream(edge.stream)
                .map_or((0, 0.0), |s| (s.compressed_size, s.share));

            match by_pair.get(&(edge.source, edge.target)) {
                Some(&idx) => {
                    let existing = &mut merged[idx];
                    existing.streams.push(edge.stream);
                    existing.compressed_size += size;
                    existing.share += share;
                    existing.in_largest_path |= edge.in_largest_path;
                }
                None => {
                    by_pair.insert((edge.source, edge.target), merged.len());
                    merged.push(VisibleEdge {
                        id: edge.id,
                        source: edge.source,
                        target: edge.target,
                        label: edge.label.clone(),
                        streams: vec![edge.stream],
                        compressed_size: size,
                        share,
                        in_largest_path: edge.in_largest_path,
                    });
                }
            }
        }

        let precision = self.config.share_precision;
        for edge in merged.iter_mut().filter(|e| e.is_coalesced()) {
            edge.label = format!(
                "#- (-) | Multiple edges\n{} [{:.*}%]\n- [-]",
                edge.compressed_size, precision, edge.share
            );
        }
        merged
    }
}
