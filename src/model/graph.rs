use super::ids::{CodecId, GraphId};
use super::params::LocalParams;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphType {
    Standard,
    Static,
    Selector,
    Function,
    MultiInput,
    Parameterized,
    Segmenter,
    /// Tag not recognised; treated as non-standard
    Unknown,
}

impl GraphType {
    pub fn display_name(self) -> &'static str {
        match self {
            GraphType::Standard => "Standard",
            GraphType::Static => "Static",
            GraphType::Selector => "Selector",
            GraphType::Function => "Function",
            GraphType::MultiInput => "Multiple_Input",
            GraphType::Parameterized => "Parameterized",
            GraphType::Segmenter => "Segmenter",
            GraphType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for GraphType {
    type Err = String;

    /// Accepts `standard`, `Standard` or `ZL_GraphType_standard`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        let tag = tag.strip_prefix("ZL_GraphType_").unwrap_or(tag);
        match tag.to_ascii_lowercase().as_str() {
            "standard" => Ok(GraphType::Standard),
            "static" => Ok(GraphType::Static),
            "selector" => Ok(GraphType::Selector),
            "function" => Ok(GraphType::Function),
            "multi_input" | "multiple_input" => Ok(GraphType::MultiInput),
            "parameterized" => Ok(GraphType::Parameterized),
            "segmenter" => Ok(GraphType::Segmenter),
            _ => Err(s.to_string()),
        }
    }
}

/// A named group of codecs that collapses into one node.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionGraph {
    pub id: GraphId,
    pub graph_type: GraphType,
    pub name: String,
    pub failure_message: Option<String>,
    pub local_params: LocalParams,
    pub codecs: Vec<CodecId>,
}

impl FunctionGraph {
    pub fn first_codec(&self) -> Option<CodecId> {
        self.codecs.first().copied()
    }

    pub fn is_standard(&self) -> bool {
        self.graph_type == GraphType::Standard
    }

    pub fn has_failed(&self) -> bool {
        self.failure_message.is_some()
    }

    pub fn has_local_params(&self) -> bool {
        !self.local_params.is_empty()
    }

    /// `<name> (G<n>)`
    pub fn header(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }

    /// `<graph type> | <n> codecs`
    pub fn detail(&self) -> String {
        format!("{} | {} codecs", self.graph_type, self.codecs.len())
    }
}
