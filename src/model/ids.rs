//! Opaque identifiers.
//!
//! Codecs, streams and graphs each get their own id namespace. Ids are
//! positions in the trace collections and never refer to memory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Position in the owning collection
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a codec (transform unit)
    CodecId,
    "C"
);
entity_id!(
    /// Identifier of a stream (data buffer)
    StreamId,
    "S"
);
entity_id!(
    /// Identifier of a function graph
    GraphId,
    "G"
);

/// The root codec: the only codec without inputs.
pub const ROOT_CODEC: CodecId = CodecId(0);

/// Synthetic input stream of the root codec, removed during normalization.
pub const ROOT_INPUT_STREAM: StreamId = StreamId(0);

// =============================================================================
// VIEW NODE IDS
// =============================================================================

/// A node of the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeId {
    Codec(CodecId),
    Graph(GraphId),
}

impl NodeId {
    pub fn as_codec(self) -> Option<CodecId> {
        match self {
            NodeId::Codec(id) => Some(id),
            NodeId::Graph(_) => None,
        }
    }

    pub fn as_graph(self) -> Option<GraphId> {
        match self {
            NodeId::Graph(id) => Some(id),
            NodeId::Codec(_) => None,
        }
    }
}

impl From<CodecId> for NodeId {
    fn from(id: CodecId) -> Self {
        NodeId::Codec(id)
    }
}

impl From<GraphId> for NodeId {
    fn from(id: GraphId) -> Self {
        NodeId::Graph(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Codec(id) => id.fmt(f),
            NodeId::Graph(id) => id.fmt(f),
        }
    }
}

/// Error parsing a `NodeId` from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node id '{0}': expected C<n> or G<n>")]
pub struct ParseNodeIdError(pub String);

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseNodeIdError(s.to_string());
        let mut chars = s.chars();
        let prefix = chars.next().ok_or_else(err)?;
        let raw: u32 = chars.as_str().parse().map_err(|_| err())?;
        match prefix.to_ascii_uppercase() {
            'C' => Ok(NodeId::Codec(CodecId(raw))),
            'G' => Ok(NodeId::Graph(GraphId(raw))),
            _ => Err(err()),
        }
    }
}

// =============================================================================
// VIEW EDGE IDS
// =============================================================================

/// An edge of the rendered graph.
///
/// Real edges are keyed by the stream they draw. Proxy edges stand in for a
/// stream when an endpoint is hidden behind a function graph and are keyed by
/// the (source, stream, target) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeId {
    Stream(StreamId),
    Proxy {
        source: NodeId,
        stream: StreamId,
        target: NodeId,
    },
}

impl EdgeId {
    pub fn stream(self) -> StreamId {
        match self {
            EdgeId::Stream(stream) | EdgeId::Proxy { stream, .. } => stream,
        }
    }

    pub fn is_proxy(self) -> bool {
        matches!(self, EdgeId::Proxy { .. })
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeId::Stream(id) => id.fmt(f),
            EdgeId::Proxy {
                source,
                stream,
                target,
            } => write!(f, "proxy-{source}-{stream}-{target}"),
        }
    }
}
