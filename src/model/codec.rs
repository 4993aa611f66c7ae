use super::ids::{CodecId, GraphId, StreamId};
use super::params::LocalParams;
use std::fmt;
use streamdump_types::SerializedCodec;

const IN_PROGRESS_NAME: &str = "zl.#in_progress";
const STORE_NAME: &str = "zl.store";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    Standard,
    Custom,
}

impl CodecKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CodecKind::Standard => "Standard",
            CodecKind::Custom => "Custom",
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A traced codec invocation.
///
/// `owning_graph` is stamped by the builder from the graph table; the input
/// and output lists are normalized there too (terminal and root-input
/// streams removed).
#[derive(Debug, Clone, PartialEq)]
pub struct Codec {
    pub id: CodecId,
    pub name: String,
    pub kind: CodecKind,
    pub type_id: u32,
    pub header_size: u64,
    pub failure_message: Option<String>,
    pub local_params: LocalParams,
    pub inputs: Vec<StreamId>,
    pub outputs: Vec<StreamId>,
    pub owning_graph: Option<GraphId>,
}

impl Codec {
    pub(crate) fn from_serialized(id: CodecId, raw: SerializedCodec) -> Self {
        Self {
            id,
            name: raw.name,
            kind: if raw.is_standard {
                CodecKind::Standard
            } else {
                CodecKind::Custom
            },
            type_id: raw.type_id,
            header_size: raw.header_size,
            // the tracer writes an empty string for success
            failure_message: raw.failure_message.filter(|m| !m.is_empty()),
            local_params: raw.local_params.into(),
            inputs: raw.input_stream_ids.into_iter().map(StreamId).collect(),
            outputs: raw.output_stream_ids.into_iter().map(StreamId).collect(),
            owning_graph: None,
        }
    }

    pub fn has_failed(&self) -> bool {
        self.failure_message.is_some()
    }

    /// Placeholder emitted when compression stopped before this codec ran
    pub fn is_in_progress(&self) -> bool {
        self.name == IN_PROGRESS_NAME
    }

    pub fn is_store(&self) -> bool {
        self.name == STORE_NAME
    }

    pub fn has_local_params(&self) -> bool {
        !self.local_params.is_empty()
    }

    /// `<name> (<type id>) (C<n>)`
    pub fn header(&self) -> String {
        format!("{} ({}) ({})", self.name, self.type_id, self.id)
    }

    /// `<kind> | <header size>`
    pub fn detail(&self) -> String {
        format!("{} | {}", self.kind, self.header_size)
    }
}
