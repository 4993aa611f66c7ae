//! Entity store: codecs, streams and function graphs from a trace.

mod codec;
mod graph;
mod ids;
mod params;
mod store;
mod stream;

pub use codec::{Codec, CodecKind};
pub use graph::{FunctionGraph, GraphType};
pub use ids::{
    CodecId, EdgeId, GraphId, NodeId, ParseNodeIdError, StreamId, ROOT_CODEC, ROOT_INPUT_STREAM,
};
pub use params::{CopyParam, IntParam, LocalParams, RefParam};
pub use store::EntityStore;
pub use stream::{Stream, StreamExclusion, StreamType};
