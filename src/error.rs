//! Error types.
//!
//! Two fatal classes: `ConsistencyError` while building a graph from a trace,
//! `LookupInvariantViolation` while serving visibility queries and toggles.

use crate::model::{CodecId, GraphId, NodeId, StreamId};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = StreamdumpError> = std::result::Result<T, E>;

/// Structural problems in a trace, raised during construction only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// The trace has no codecs at all.
    #[error("Empty trace: at least the root codec is required")]
    EmptyTrace,

    /// A codec lists a stream id outside the stream table.
    #[error("Unknown stream: {codec} references {stream} which doesn't exist")]
    UnknownStream {
        codec: CodecId,
        stream: StreamId,
    },

    /// A graph lists a codec id outside the codec table.
    #[error("Unknown codec: {graph} references {codec} which doesn't exist")]
    UnknownCodec {
        graph: GraphId,
        codec: CodecId,
    },

    /// A codec may belong to at most one function graph.
    #[error("Codec {codec} is owned by both {first} and {second}")]
    CodecInMultipleGraphs {
        codec: CodecId,
        first: GraphId,
        second: GraphId,
    },

    #[error("Stream {stream} is produced by both {first} and {second}")]
    StreamMultipleSources {
        stream: StreamId,
        first: CodecId,
        second: CodecId,
    },

    #[error("Stream {stream} is consumed by both {first} and {second}")]
    StreamMultipleTargets {
        stream: StreamId,
        first: CodecId,
        second: CodecId,
    },

    /// A store stream that nothing produced.
    #[error("Terminal stream {stream} has no source codec")]
    TerminalStreamWithoutSource { stream: StreamId },

    #[error("Codec {codec} produces more than one terminal stream: {}", format_streams(streams))]
    MultipleTerminalStreams {
        codec: CodecId,
        streams: Vec<StreamId>,
    },

    /// Stream 0 is reserved for the root input and must exist.
    #[error("Missing root input stream S0")]
    MissingRootInput,

    #[error("Root input stream S0 must target C0, found {}", format_codec(found))]
    RootInputTarget { found: Option<CodecId> },

    #[error("Root input stream S0 must not be produced by a codec, found {source_codec}")]
    RootInputProduced { source_codec: CodecId },

    #[error("Root codec C0 must have S0 as its sole input, found [{}]", format_streams(inputs))]
    RootInputs { inputs: Vec<StreamId> },

    #[error("Stream {stream} has a target but no source codec")]
    StreamWithoutSource { stream: StreamId },

    /// Only C0 may be left without inputs after normalization.
    #[error("Codec {codec} has no inputs but is not the root")]
    AdditionalRoot { codec: CodecId },

    #[error("Cycle detected among codecs: {}", format_codecs(unresolved))]
    Cycle { unresolved: Vec<CodecId> },
}

impl ConsistencyError {
    pub fn code(&self) -> &'static str {
        match self {
            ConsistencyError::EmptyTrace => "EMPTY_TRACE",
            ConsistencyError::UnknownStream { .. } => "UNKNOWN_STREAM",
            ConsistencyError::UnknownCodec { .. } => "UNKNOWN_CODEC",
            ConsistencyError::CodecInMultipleGraphs { .. } => "CODEC_IN_MULTIPLE_GRAPHS",
            ConsistencyError::StreamMultipleSources { .. } => "STREAM_MULTIPLE_SOURCES",
            ConsistencyError::StreamMultipleTargets { .. } => "STREAM_MULTIPLE_TARGETS",
            ConsistencyError::TerminalStreamWithoutSource { .. } => {
                "TERMINAL_STREAM_WITHOUT_SOURCE"
            }
            ConsistencyError::MultipleTerminalStreams { .. } => "MULTIPLE_TERMINAL_STREAMS",
            ConsistencyError::MissingRootInput => "MISSING_ROOT_INPUT",
            ConsistencyError::RootInputTarget { .. } => "ROOT_INPUT_TARGET",
            ConsistencyError::RootInputProduced { .. } => "ROOT_INPUT_PRODUCED",
            ConsistencyError::RootInputs { .. } => "ROOT_INPUTS",
            ConsistencyError::StreamWithoutSource { .. } => "STREAM_WITHOUT_SOURCE",
            ConsistencyError::AdditionalRoot { .. } => "ADDITIONAL_ROOT",
            ConsistencyError::Cycle { .. } => "CYCLE",
        }
    }
}

/// Interactive-time failures. Raised before the failing call mutates anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupInvariantViolation {
    /// Proxy synthesis and the DAG disagree about a group boundary.
    #[error(
        "Expected exactly one proxy edge on {group} for {stream} with {counterpart}, found {found}"
    )]
    ProxyEdgeCount {
        group: GraphId,
        counterpart: NodeId,
        stream: StreamId,
        found: usize,
    },

    #[error("Unknown codec {0}")]
    UnknownCodec(CodecId),

    #[error("Unknown graph {0}")]
    UnknownGraph(GraphId),

    /// The operation needs the graph's first codec.
    #[error("Graph {0} owns no codecs")]
    EmptyGraph(GraphId),
}

impl LookupInvariantViolation {
    pub fn code(&self) -> &'static str {
        match self {
            LookupInvariantViolation::ProxyEdgeCount { .. } => "PROXY_EDGE_COUNT",
            LookupInvariantViolation::UnknownCodec(_) => "UNKNOWN_CODEC",
            LookupInvariantViolation::UnknownGraph(_) => "UNKNOWN_GRAPH",
            LookupInvariantViolation::EmptyGraph(_) => "EMPTY_GRAPH",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Umbrella error for callers that drive the whole pipeline.
#[derive(Debug, Error)]
pub enum StreamdumpError {
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error(transparent)]
    Lookup(#[from] LookupInvariantViolation),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid trace JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StreamdumpError {
    pub fn code(&self) -> &'static str {
        match self {
            StreamdumpError::Consistency(e) => e.code(),
            StreamdumpError::Lookup(e) => e.code(),
            StreamdumpError::Config(_) => "CONFIG",
            StreamdumpError::Json(_) => "INVALID_JSON",
        }
    }
}

fn format_streams(streams: &[StreamId]) -> String {
    streams
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_codecs(codecs: &[CodecId]) -> String {
    codecs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_codec(codec: &Option<CodecId>) -> String {
    codec.map_or_else(|| "none".to_string(), |c| c.to_string())
}
