//! Projection of the visible graph into renderer descriptors.

use super::visible::VisibleEdge;
use super::{CodecNode, GraphNode, StreamdumpGraph};
use crate::error::LookupInvariantViolation;
use crate::model::NodeId;
use streamdump_types::{
    CodecNodeDescriptor, EdgeDescriptor, GraphNodeDescriptor, NodeDescriptor, StreamdumpView,
};

impl StreamdumpGraph {
    /// Visible nodes and edges as `streamdump_types` descriptors.
    pub fn view(&self) -> Result<StreamdumpView, LookupInvariantViolation> {
        let visible = self.visible_graph()?;

        let nodes = visible
            .nodes
            .iter()
            .filter_map(|&node| self.node_descriptor(node))
            .collect();
        let edges = visible.edges.iter().map(edge_descriptor).collect();

        Ok(StreamdumpView { nodes, edges })
    }

    pub fn node_descriptor(&self, id: NodeId) -> Option<NodeDescriptor> {
        match id {
            NodeId::Codec(codec) => self
                .codec_node(codec)
                .and_then(|node| self.codec_descriptor(node))
                .map(NodeDescriptor::Codec),
            NodeId::Graph(graph) => self
                .graph_node(graph)
                .and_then(|node| self.graph_descriptor(node))
                .map(NodeDescriptor::Graph),
        }
    }

    fn codec_descriptor(&self, node: &CodecNode) -> Option<CodecNodeDescriptor> {
        let codec = self.store.codec(node.codec)?;
        Some(CodecNodeDescriptor {
            id: codec.id.to_string(),
            name: codec.name.clone(),
            kind: codec.kind.to_string(),
            type_id: codec.type_id,
            header_size: codec.header_size,
            header: codec.header(),
            detail: codec.detail(),
            failure_message: codec.failure_message.clone(),
            owning_graph: codec.owning_graph.map(|g| g.to_string()),
            in_progress: codec.is_in_progress(),
            store: codec.is_store(),
            has_local_params: codec.has_local_params(),
            visible: node.is_visible(),
            collapsed: node.is_collapsed(),
            collapsible: self.dag.has_children(codec.id) || !codec.outputs.is_empty(),
            expandable_one_level: node.is_collapsed(),
            in_largest_path: node.in_largest_path,
        })
    }

    fn graph_descriptor(&self, node: &GraphNode) -> Option<GraphNodeDescriptor> {
        let graph = self.store.graph(node.graph)?;
        Some(GraphNodeDescriptor {
            id: graph.id.to_string(),
            name: graph.name.clone(),
            graph_type: graph.graph_type.to_string(),
            header: graph.header(),
            detail: graph.detail(),
            failure_message: graph.failure_message.clone(),
            codec_ids: graph.codecs.iter().map(ToString::to_string).collect(),
            has_local_params: graph.has_local_params(),
            visible: node.is_visible(),
            collapsed: node.is_collapsed(),
            in_largest_path: node.in_largest_path,
        })
    }
}

fn edge_descriptor(edge: &VisibleEdge) -> EdgeDescriptor {
    EdgeDescriptor {
        id: edge.id.to_string(),
        source: edge.source.to_string(),
        target: edge.target.to_string(),
        label: edge.label.clone(),
        in_largest_path: edge.in_largest_path,
        stream_ids: edge.streams.iter().map(ToString::to_string).collect(),
        coalesced: edge.is_coalesced(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{linear_split, two_graphs};
    use super::*;
    use crate::model::{CodecId, GraphId};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_codec_descriptor_fields() {
        let mut graph = StreamdumpGraph::new(linear_split()).unwrap();
        graph.toggle_subgraph_collapse(CodecId(1)).unwrap();
        let view = graph.view().unwrap();

        let ids: Vec<&str> = view.nodes.iter().map(NodeDescriptor::id).collect();
        assert_eq!(ids, vec!["C0", "C1"]);

        let Some(NodeDescriptor::Codec(split)) = view.node("C1") else {
            panic!("C1 should be a visible codec");
        };
        assert_eq!(split.header, "split (0) (C1)");
        assert_eq!(split.detail, "Standard | 0");
        assert!(split.collapsed);
        assert!(split.collapsible);
        assert!(split.expandable_one_level);
        assert!(split.in_largest_path);
        assert_eq!(split.owning_graph, None);
    }

    #[test]
    fn test_graph_descriptor_and_proxy_edge() {
        let mut graph = StreamdumpGraph::new(two_graphs()).unwrap();
        graph.toggle_graph_collapse(GraphId(0)).unwrap();
        let view = graph.view().unwrap();

        let Some(NodeDescriptor::Graph(g0)) = view.node("G0") else {
            panic!("G0 should be a visible graph");
        };
        assert_eq!(g0.header, "graph_0 (G0)");
        assert_eq!(g0.detail, "Standard | 2 codecs");
        assert_eq!(g0.codec_ids, vec!["C1", "C2"]);
        assert!(g0.collapsed);

        let edge = view.edge_between("G0", "C3").unwrap();
        assert_eq!(edge.id, "proxy-G0-S3-C3");
        assert_eq!(edge.stream_ids, vec!["S3"]);
        assert!(!edge.coalesced);
    }

    #[test]
    fn test_leaf_codec_not_collapsible() {
        let graph = StreamdumpGraph::new(linear_split()).unwrap();
        let descriptor = graph.node_descriptor(CodecId(3).into()).unwrap();

        let NodeDescriptor::Codec(leaf) = descriptor else {
            panic!("expected a codec descriptor");
        };
        assert!(!leaf.collapsible);
        assert!(!leaf.expandable_one_level);
        assert!(!leaf.in_largest_path);
    }
}
