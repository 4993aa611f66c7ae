//! View configuration.
//!
//! ```yaml
//! collapse_standard_graphs: true
//! mark_largest_path: true
//! share_precision: 2
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Run the startup collapse pass over standard graphs
    pub collapse_standard_graphs: bool,
    /// Flag the heaviest root-to-sink path at construction
    pub mark_largest_path: bool,
    /// Decimal places for share percentages in edge labels
    pub share_precision: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            collapse_standard_graphs: false,
            mark_largest_path: true,
            share_precision: 2,
        }
    }
}

impl ViewConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn with_startup_collapse(mut self, collapse: bool) -> Self {
        self.collapse_standard_graphs = collapse;
        self
    }
}
