use super::ids::{CodecId, StreamId};
use std::fmt;
use streamdump_types::SerializedStream;

/// Element layout of a stream, from the tracer's type bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamType {
    Serial,
    Struct,
    Numeric,
    String,
    Other(u8),
}

impl From<u8> for StreamType {
    fn from(tag: u8) -> Self {
        match tag {
            1 => StreamType::Serial,
            2 => StreamType::Struct,
            4 => StreamType::Numeric,
            8 => StreamType::String,
            other => StreamType::Other(other),
        }
    }
}

impl StreamType {
    pub fn name(self) -> &'static str {
        match self {
            StreamType::Serial => "Serialized",
            StreamType::Struct => "Fixed_Width",
            StreamType::Numeric => "Numeric",
            StreamType::String => "Variable_Size",
            StreamType::Other(_) => "default",
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a stream draws no edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamExclusion {
    /// Store buffer with no consumer
    Terminal,
    /// Synthetic input of the root codec
    RootInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub id: StreamId,
    pub source: Option<CodecId>,
    pub target: Option<CodecId>,
    pub stream_type: StreamType,
    pub compressed_size: u64,
    pub element_count: u64,
    pub element_width: u64,
    /// Percentage of the total compressed size
    pub share: f64,
    pub output_index: u32,
    pub exclusion: Option<StreamExclusion>,
}

impl Stream {
    pub(crate) fn from_serialized(id: StreamId, raw: &SerializedStream) -> Self {
        Self {
            id,
            source: None,
            target: None,
            stream_type: StreamType::from(raw.type_tag),
            compressed_size: raw.compressed_size,
            element_count: raw.element_count,
            element_width: raw.element_width,
            share: raw.share,
            output_index: raw.output_index,
            exclusion: None,
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.exclusion.is_some()
    }

    /// Both endpoints, for a stream that survived normalization
    pub fn endpoints(&self) -> Option<(CodecId, CodecId)> {
        if self.is_excluded() {
            return None;
        }
        Some((self.source?, self.target?))
    }

    pub fn label(&self, precision: usize) -> String {
        format!(
            "#{} ({}) | {}\n{} [{:.*}%]\n{} [{}]",
            self.output_index,
            self.id,
            self.stream_type,
            self.compressed_size,
            precision,
            self.share,
            self.element_count,
            self.element_width,
        )
    }
}
