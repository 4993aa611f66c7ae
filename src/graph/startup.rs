//! Startup collapse of standard graphs.

use super::view_model::NodeTransition;
use super::StreamdumpGraph;

impl StreamdumpGraph {
    /// Hide every top-level standard graph behind its own collapsed node.
    ///
    /// Walks codecs in DAG order so upstream graphs are hidden first; a graph
    /// already hidden by an upstream one is left alone and keeps its state.
    pub(super) fn collapse_standard_graphs(&mut self) {
        let order = self.dag.dag_order().to_vec();
        let mut collapsed = 0usize;

        for codec in order {
            let Some(graph_id) = self.owning_graph(codec) else {
                continue;
            };
            if !self.graph_visible(graph_id) || self.graph_collapsed(graph_id) {
                continue;
            }
            let is_entry = self
                .store
                .graph(graph_id)
                .is_some_and(|g| g.is_standard() && g.first_codec() == Some(codec));
            if !is_entry {
                continue;
            }

            self.toggle_graph_hide_unchecked(graph_id, codec);
            self.transition_codec(codec, NodeTransition::Hide);
            self.transition_graph(graph_id, NodeTransition::Collapse);
            collapsed += 1;
        }

        tracing::debug!(collapsed, "startup collapse of standard graphs");
    }
}
