use super::codec::Codec;
use super::graph::FunctionGraph;
use super::ids::{CodecId, GraphId, StreamId};
use super::stream::Stream;

/// Immutable entity tables, indexed by id.
///
/// Built and normalized once by the graph builder; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    pub(crate) codecs: Vec<Codec>,
    pub(crate) streams: Vec<Stream>,
    pub(crate) graphs: Vec<FunctionGraph>,
}

impl EntityStore {
    pub fn codec(&self, id: CodecId) -> Option<&Codec> {
        self.codecs.get(id.index())
    }

    pub fn stream(&self, id: StreamId) -> Option<&Stream> {
        self.streams.get(id.index())
    }

    pub fn graph(&self, id: GraphId) -> Option<&FunctionGraph> {
        self.graphs.get(id.index())
    }

    pub fn codecs(&self) -> &[Codec] {
        &self.codecs
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn graphs(&self) -> &[FunctionGraph] {
        &self.graphs
    }

    /// Streams that draw an edge, with their endpoints
    pub fn surviving_streams(&self) -> impl Iterator<Item = (&Stream, CodecId, CodecId)> {
        self.streams
            .iter()
            .filter_map(|s| s.endpoints().map(|(src, dst)| (s, src, dst)))
    }

    pub fn owning_graph(&self, codec: CodecId) -> Option<GraphId> {
        self.codec(codec).and_then(|c| c.owning_graph)
    }
}
