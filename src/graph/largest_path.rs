//! Largest compression path.
//!
//! From the root, repeatedly follow the output stream with the largest
//! compressed size (first wins ties) until a codec has no outputs.

use super::StreamdumpGraph;
use crate::model::{CodecId, StreamId, ROOT_CODEC};
use std::collections::HashSet;

/// One step of the path: a codec and the stream followed out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub codec: CodecId,
    /// `None` on the last codec
    pub via: Option<StreamId>,
}

impl StreamdumpGraph {
    /// The heaviest root-to-sink path. Never visits a codec twice.
    pub fn largest_compression_path(&self) -> Vec<PathStep> {
        let mut path = Vec::new();
        let mut visited: HashSet<CodecId> = HashSet::new();
        let mut current = Some(ROOT_CODEC);

        while let Some(codec_id) = current.take() {
            let Some(codec) = self.store.codec(codec_id) else {
                break;
            };
            if !visited.insert(codec_id) {
                break;
            }

            let mut largest: Option<(StreamId, u64, CodecId)> = None;
            for &stream_id in &codec.outputs {
                let Some(stream) = self.store.stream(stream_id) else {
                    continue;
                };
                let Some((_, target)) = stream.endpoints() else {
                    continue;
                };
                // strictly larger replaces, so the first maximum wins
                if largest.map_or(true, |(_, size, _)| stream.compressed_size > size) {
                    largest = Some((stream_id, stream.compressed_size, target));
                }
            }

            path.push(PathStep {
                codec: codec_id,
                via: largest.map(|(stream, _, _)| stream),
            });
            current = largest.map(|(_, _, target)| target);
        }

        path
    }

    /// Flag the path's codecs, their graphs and the edges (real and proxy)
    /// of every stream followed.
    pub(super) fn mark_largest_path(&mut self) {
        let path = self.largest_compression_path();

        for step in &path {
            if let Some(node) = self.codec_mut(step.codec) {
                node.in_largest_path = true;
            }
            if let Some(graph) = self.owning_graph(step.codec) {
                if let Some(node) = self.graph_mut(graph) {
                    node.in_largest_path = true;
                }
            }
            if let Some(stream) = step.via {
                for edge in self.edges.iter_mut().filter(|e| e.stream == stream) {
                    edge.in_largest_path = true;
                }
            }
        }

        tracing::debug!(length = path.len(), "marked largest compression path");
    }
}
