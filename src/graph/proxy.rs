//! Proxy edges across function-graph boundaries.
//!
//! When a graph is collapsed its codecs are hidden, so every stream crossing
//! its boundary needs an edge that ends at the graph node instead. Proxies
//! are built once here and looked up by `visible_graph`.

use super::view_model::{EdgeSlot, EdgeView};
use super::StreamdumpGraph;
use crate::error::LookupInvariantViolation;
use crate::model::{CodecId, EdgeId, GraphId, NodeId, StreamId};

/// Which proxy list of a graph node to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProxySide {
    Incoming,
    Outgoing,
}

impl StreamdumpGraph {
    pub(super) fn synthesize_proxies(&mut self) {
        let crossings: Vec<(StreamId, CodecId, CodecId)> = self
            .store
            .surviving_streams()
            .map(|(stream, source, target)| (stream.id, source, target))
            .collect();

        for (stream, source, target) in crossings {
            let source_graph = self.owning_graph(source);
            let target_graph = self.owning_graph(target);

            match (source_graph, target_graph) {
                (Some(sg), Some(tg)) if sg != tg => {
                    let slot = self.push_proxy(sg.into(), stream, tg.into());
                    self.attach(sg, ProxySide::Outgoing, slot);
                    self.attach(tg, ProxySide::Incoming, slot);

                    let slot = self.push_proxy(sg.into(), stream, target.into());
                    self.attach(sg, ProxySide::Outgoing, slot);

                    let slot = self.push_proxy(source.into(), stream, tg.into());
                    self.attach(tg, ProxySide::Incoming, slot);
                }
                (Some(sg), None) => {
                    let slot = self.push_proxy(sg.into(), stream, target.into());
                    self.attach(sg, ProxySide::Outgoing, slot);
                }
                (None, Some(tg)) => {
                    let slot = self.push_proxy(source.into(), stream, tg.into());
                    self.attach(tg, ProxySide::Incoming, slot);
                }
                // internal to one graph, or no graphs involved
                _ => {}
            }
        }
    }

    /// Copy of the stream's real edge with rerouted endpoints
    fn push_proxy(&mut self, source: NodeId, stream: StreamId, target: NodeId) -> EdgeSlot {
        let label = self
            .real_edge(stream)
            .map(|e| e.label.clone())
            .unwrap_or_default();
        let slot = EdgeSlot(self.edges.len());
        self.edges.push(EdgeView {
            id: EdgeId::Proxy {
                source,
                stream,
                target,
            },
            stream,
            source,
            target,
            label,
            in_largest_path: false,
        });
        slot
    }

    fn attach(&mut self, graph: GraphId, side: ProxySide, slot: EdgeSlot) {
        if let Some(node) = self.graph_mut(graph) {
            match side {
                ProxySide::Incoming => node.incoming.push(slot),
                ProxySide::Outgoing => node.outgoing.push(slot),
            }
        }
    }

    fn proxy_slots(&self, graph: GraphId, side: ProxySide) -> &[EdgeSlot] {
        match (self.graph_node(graph), side) {
            (Some(node), ProxySide::Incoming) => node.incoming.as_slice(),
            (Some(node), ProxySide::Outgoing) => node.outgoing.as_slice(),
            (None, _) => &[],
        }
    }

    /// The single proxy on `graph` carrying `stream` to/from `counterpart`.
    pub(crate) fn find_proxy(
        &self,
        graph: GraphId,
        side: ProxySide,
        counterpart: NodeId,
        stream: StreamId,
    ) -> Result<EdgeSlot, LookupInvariantViolation> {
        let found: Vec<EdgeSlot> = self
            .proxy_slots(graph, side)
            .iter()
            .copied()
            .filter(|slot| {
                self.edges.get(slot.0).is_some_and(|edge| {
                    let end = match side {
                        ProxySide::Incoming => edge.source,
                        ProxySide::Outgoing => edge.target,
                    };
                    edge.stream == stream && end == counterpart
                })
            })
            .collect();

        match found.as_slice() {
            [slot] => Ok(*slot),
            other => Err(LookupInvariantViolation::ProxyEdgeCount {
                group: graph,
                counterpart,
                stream,
                found: other.len(),
            }),
        }
    }

    pub fn incoming_proxies(&self, graph: GraphId) -> impl Iterator<Item = &EdgeView> {
        self.proxy_slots(graph, ProxySide::Incoming)
            .iter()
            .filter_map(|slot| self.edges.get(slot.0))
    }

    pub fn outgoing_proxies(&self, graph: GraphId) -> impl Iterator<Item = &EdgeView> {
        self.proxy_slots(graph, ProxySide::Outgoing)
            .iter()
            .filter_map(|slot| self.edges.get(slot.0))
    }
}
