//! Interactive streamdump graph.
//!
//! `StreamdumpGraph` owns the normalized entity store, the DAG index, the
//! node/edge view models and the proxy edges. Structure is computed once in
//! `builder`; every later call only flips node states.
//!
//! ```text
//! SerializedStreamdump
//!        │
//!        ▼
//!   builder ──► EntityStore ──► CodecDag
//!        │                        │
//!        ▼                        ▼
//!   real edges ──► proxy ──► largest_path ──► startup ──► visibility / visible
//! ```

mod actions;
mod builder;
mod descriptor;
mod largest_path;
mod proxy;
mod startup;
mod traversal;
mod visibility;
mod visible;
mod view_model;

pub use actions::{ParseActionError, ViewAction};
pub use largest_path::PathStep;
pub use traversal::Descent;
pub use view_model::{CodecNode, EdgeView, GraphNode, NodeState, NodeTransition};
pub use visible::{VisibleEdge, VisibleGraph};

use crate::config::ViewConfig;
use crate::dag::CodecDag;
use crate::error::{ConsistencyError, LookupInvariantViolation, StreamdumpError};
use crate::model::{
    CodecId, EdgeId, EntityStore, FunctionGraph, GraphId, NodeId, StreamId, ROOT_CODEC,
};
use std::collections::HashMap;
use streamdump_types::SerializedStreamdump;
use view_model::EdgeSlot;

pub struct StreamdumpGraph {
    pub(crate) store: EntityStore,
    pub(crate) dag: CodecDag,
    pub(crate) codec_nodes: Vec<CodecNode>,
    pub(crate) graph_nodes: Vec<GraphNode>,
    /// Real edges followed by proxies
    pub(crate) edges: Vec<EdgeView>,
    pub(crate) stream_edges: HashMap<StreamId, EdgeSlot>,
    pub(crate) config: ViewConfig,
}

impl StreamdumpGraph {
    /// Build with the default configuration
    pub fn new(trace: SerializedStreamdump) -> Result<Self, ConsistencyError> {
        Self::with_config(trace, ViewConfig::default())
    }

    pub fn with_config(
        trace: SerializedStreamdump,
        config: ViewConfig,
    ) -> Result<Self, ConsistencyError> {
        let mut graph = builder::build(trace, config)?;

        if graph.config.mark_largest_path {
            graph.mark_largest_path();
        }
        if graph.config.collapse_standard_graphs {
            graph.collapse_standard_graphs();
        }

        Ok(graph)
    }

    /// Parse a JSON trace and build
    pub fn from_json_str(json: &str, config: ViewConfig) -> Result<Self, StreamdumpError> {
        let trace: SerializedStreamdump = serde_json::from_str(json)?;
        Ok(Self::with_config(trace, config)?)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn dag(&self) -> &CodecDag {
        &self.dag
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn codec_node(&self, id: CodecId) -> Option<&CodecNode> {
        self.codec_nodes.get(id.index())
    }

    pub fn graph_node(&self, id: GraphId) -> Option<&GraphNode> {
        self.graph_nodes.get(id.index())
    }

    pub fn codec_nodes(&self) -> &[CodecNode] {
        &self.codec_nodes
    }

    pub fn graph_nodes(&self) -> &[GraphNode] {
        &self.graph_nodes
    }

    /// Every edge view model, real and proxy
    pub fn edges(&self) -> &[EdgeView] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&EdgeView> {
        match id {
            EdgeId::Stream(stream) => self.real_edge(stream),
            EdgeId::Proxy { .. } => self.edges.iter().find(|e| e.id == id),
        }
    }

    /// The codec-to-codec edge drawn for a surviving stream
    pub fn real_edge(&self, stream: StreamId) -> Option<&EdgeView> {
        self.stream_edges
            .get(&stream)
            .and_then(|slot| self.edges.get(slot.0))
    }

    pub fn node_state(&self, id: NodeId) -> Option<NodeState> {
        match id {
            NodeId::Codec(codec) => self.codec_node(codec).map(|n| n.state),
            NodeId::Graph(graph) => self.graph_node(graph).map(|n| n.state),
        }
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node_state(id).is_some_and(NodeState::is_visible)
    }

    pub fn is_collapsed(&self, id: NodeId) -> bool {
        self.node_state(id).is_some_and(NodeState::is_collapsed)
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    pub(crate) fn owning_graph(&self, codec: CodecId) -> Option<GraphId> {
        self.store.owning_graph(codec)
    }

    pub(crate) fn check_codec(&self, id: CodecId) -> Result<(), LookupInvariantViolation> {
        if id.index() < self.codec_nodes.len() {
            Ok(())
        } else {
            Err(LookupInvariantViolation::UnknownCodec(id))
        }
    }

    pub(crate) fn check_graph(&self, id: GraphId) -> Result<&FunctionGraph, LookupInvariantViolation> {
        self.store
            .graph(id)
            .ok_or(LookupInvariantViolation::UnknownGraph(id))
    }

    /// First owned codec, required by graph-level toggles
    pub(crate) fn first_codec_of(&self, id: GraphId) -> Result<CodecId, LookupInvariantViolation> {
        self.check_graph(id)?
            .first_codec()
            .ok_or(LookupInvariantViolation::EmptyGraph(id))
    }

    // Node accessors below are only called with ids validated by the public
    // entry points or taken from the store itself.

    pub(crate) fn codec_mut(&mut self, id: CodecId) -> Option<&mut CodecNode> {
        self.codec_nodes.get_mut(id.index())
    }

    pub(crate) fn graph_mut(&mut self, id: GraphId) -> Option<&mut GraphNode> {
        self.graph_nodes.get_mut(id.index())
    }

    /// The root codec ignores `Hide`, even when its owning graph collapses.
    pub(crate) fn transition_codec(&mut self, id: CodecId, transition: NodeTransition) {
        if id == ROOT_CODEC && transition == NodeTransition::Hide {
            return;
        }
        if let Some(node) = self.codec_mut(id) {
            node.transition(transition);
        }
    }

    pub(crate) fn transition_graph(&mut self, id: GraphId, transition: NodeTransition) {
        if let Some(node) = self.graph_mut(id) {
            node.transition(transition);
        }
    }

    pub(crate) fn codec_visible(&self, id: CodecId) -> bool {
        self.codec_node(id).is_some_and(CodecNode::is_visible)
    }

    pub(crate) fn codec_collapsed(&self, id: CodecId) -> bool {
        self.codec_node(id).is_some_and(CodecNode::is_collapsed)
    }

    pub(crate) fn graph_visible(&self, id: GraphId) -> bool {
        self.graph_node(id).is_some_and(GraphNode::is_visible)
    }

    pub(crate) fn graph_collapsed(&self, id: GraphId) -> bool {
        self.graph_node(id).is_some_and(GraphNode::is_collapsed)
    }
}

impl std::fmt::Debug for StreamdumpGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamdumpGraph")
            .field("codecs", &self.codec_nodes.len())
            .field("graphs", &self.graph_nodes.len())
            .field("edges", &self.edges.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Trace builders shared by the unit tests.

    use streamdump_types::{SerializedCodec, SerializedGraph, SerializedStream, SerializedStreamdump};

    pub struct TraceBuilder {
        trace: SerializedStreamdump,
    }

    impl TraceBuilder {
        /// Root codec C0 fed by the sentinel stream S0
        pub fn new() -> Self {
            let mut builder = Self {
                trace: SerializedStreamdump::default(),
            };
            builder.trace.streams.push(SerializedStream::default());
            builder.trace.codecs.push(SerializedCodec {
                name: "root".to_string(),
                input_stream_ids: vec![0],
                ..Default::default()
            });
            builder
        }

        pub fn codec(mut self, name: &str) -> Self {
            self.trace.codecs.push(SerializedCodec {
                name: name.to_string(),
                is_standard: true,
                ..Default::default()
            });
            self
        }

        /// Stream from `src` to `dst` (or a terminal stream when `dst` is None)
        pub fn stream(mut self, src: u32, dst: Option<u32>, size: u64, share: f64) -> Self {
            let id = self.trace.streams.len() as u32;
            let output_index = self.trace.codecs[src as usize].output_stream_ids.len() as u32;
            self.trace.streams.push(SerializedStream {
                type_tag: 1,
                compressed_size: size,
                element_count: size,
                element_width: 1,
                share,
                output_index,
                ..Default::default()
            });
            self.trace.codecs[src as usize].output_stream_ids.push(id);
            if let Some(dst) = dst {
                self.trace.codecs[dst as usize].input_stream_ids.push(id);
            }
            self
        }

        pub fn edge(self, src: u32, dst: u32, size: u64) -> Self {
            self.stream(src, Some(dst), size, size as f64)
        }

        pub fn graph(mut self, graph_type: &str, codecs: &[u32]) -> Self {
            let idx = self.trace.graphs.len();
            self.trace.graphs.push(SerializedGraph {
                graph_type: graph_type.to_string(),
                name: format!("graph_{idx}"),
                codec_ids: codecs.to_vec(),
                ..Default::default()
            });
            self
        }

        pub fn build(self) -> SerializedStreamdump {
            self.trace
        }
    }

    /// C0 -S1-> C1, C1 -S2(60)-> C2, C1 -S3(40)-> C3
    pub fn linear_split() -> SerializedStreamdump {
        TraceBuilder::new()
            .codec("split")
            .codec("left")
            .codec("right")
            .stream(0, Some(1), 100, 100.0)
            .stream(1, Some(2), 60, 60.0)
            .stream(1, Some(3), 40, 40.0)
            .build()
    }

    /// G0 = {C1, C2}, G1 = {C3}; C0 -> C1 -> C2 -> C3
    pub fn two_graphs() -> SerializedStreamdump {
        TraceBuilder::new()
            .codec("a")
            .codec("b")
            .codec("c")
            .edge(0, 1, 100)
            .edge(1, 2, 80)
            .edge(2, 3, 50)
            .graph("standard", &[1, 2])
            .graph("standard", &[3])
            .build()
    }
}
