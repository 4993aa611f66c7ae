//! Serialized trace input.
//!
//! Field aliases accept the short names emitted by the tracer
//! (`cType`, `cSize`, `codecIDs`, ...) alongside the long form.

use serde::{Deserialize, Serialize};

// ============================================================================
// TRACE ENVELOPE
// ============================================================================

/// A parsed compression trace: three parallel collections indexed by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedStreamdump {
    #[serde(default)]
    pub codecs: Vec<SerializedCodec>,
    #[serde(default)]
    pub streams: Vec<SerializedStream>,
    #[serde(default)]
    pub graphs: Vec<SerializedGraph>,
}

// ============================================================================
// ENTITIES
// ============================================================================

/// One codec invocation recorded by the tracer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedCodec {
    pub name: String,

    /// Standard (built-in) codec vs custom
    #[serde(default, alias = "cType")]
    pub is_standard: bool,

    #[serde(default, alias = "cID")]
    pub type_id: u32,

    #[serde(default, alias = "cHeaderSize")]
    pub header_size: u64,

    /// Empty or absent means the codec succeeded
    #[serde(
        default,
        alias = "cFailureString",
        skip_serializing_if = "Option::is_none"
    )]
    pub failure_message: Option<String>,

    #[serde(default, alias = "cLocalParams")]
    pub local_params: SerializedLocalParams,

    #[serde(default, alias = "inputStreams")]
    pub input_stream_ids: Vec<u32>,

    #[serde(default, alias = "outputStreams")]
    pub output_stream_ids: Vec<u32>,
}

/// One stream (data buffer) recorded by the tracer.
///
/// `source_codec` / `target_codec` are optional hints; the engine derives the
/// authoritative endpoints from the codec input/output lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedStream {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_codec: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_codec: Option<u32>,

    #[serde(default, alias = "type")]
    pub type_tag: u8,

    #[serde(default, alias = "cSize")]
    pub compressed_size: u64,

    #[serde(default, alias = "numElts")]
    pub element_count: u64,

    #[serde(default, alias = "eltWidth")]
    pub element_width: u64,

    /// Percentage of the total compressed size
    #[serde(default)]
    pub share: f64,

    #[serde(default, alias = "outputIdx")]
    pub output_index: u32,
}

/// One function graph recorded by the tracer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedGraph {
    /// `standard`, `static`, `selector`, `function`, `multi_input`,
    /// `parameterized` or `segmenter`
    #[serde(alias = "gType")]
    pub graph_type: String,

    #[serde(default, alias = "gName")]
    pub name: String,

    #[serde(
        default,
        alias = "gFailureString",
        skip_serializing_if = "Option::is_none"
    )]
    pub failure_message: Option<String>,

    #[serde(default, alias = "gLocalParams")]
    pub local_params: SerializedLocalParams,

    #[serde(default, alias = "codecIDs")]
    pub codec_ids: Vec<u32>,
}

// ============================================================================
// LOCAL PARAMETERS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedLocalParams {
    #[serde(default)]
    pub int_params: Vec<SerializedIntParam>,
    #[serde(default)]
    pub copy_params: Vec<SerializedCopyParam>,
    #[serde(default)]
    pub ref_params: Vec<SerializedRefParam>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedIntParam {
    pub param_id: i32,
    pub param_value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedCopyParam {
    pub param_id: i32,
    pub param_size: u64,
    #[serde(default)]
    pub param_data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedRefParam {
    pub param_id: i32,
    pub param_size: u64,
}
