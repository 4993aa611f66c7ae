//! Streamdump Viz - graph model and visibility engine for compression traces
//!
//! A compression trace records every codec that ran, the streams flowing
//! between them and the function graphs grouping them. This crate turns a
//! trace into an interactive graph: codecs can be collapsed, graphs folded
//! into a single node, and the currently visible subgraph projected into
//! renderer descriptors.
//!
//! ## Pipeline
//!
//! ```text
//! JSON trace ──► SerializedStreamdump ──► StreamdumpGraph::with_config
//!                                              │
//!                     ViewAction / toggle_* ───┤ (flip node states)
//!                                              ▼
//!                                  visible_graph() ──► view() ──► StreamdumpView
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use streamdump_viz::{StreamdumpGraph, ViewAction, ViewConfig};
//!
//! let json = std::fs::read_to_string("trace.json").unwrap();
//! let mut graph = StreamdumpGraph::from_json_str(&json, ViewConfig::default()).unwrap();
//! graph.apply("toggle:C1".parse::<ViewAction>().unwrap()).unwrap();
//! let view = graph.view().unwrap();
//! println!("{} nodes visible", view.nodes.len());
//! ```

// Engine settings
pub mod config;

// Producer-before-consumer ordering
pub mod dag;

pub mod error;

// Interactive graph: view models, proxies, visibility
pub mod graph;

// Normalized trace entities
pub mod model;

pub use config::ViewConfig;
pub use dag::CodecDag;
pub use error::{ConfigError, ConsistencyError, LookupInvariantViolation, Result, StreamdumpError};
pub use graph::{
    CodecNode, Descent, EdgeView, GraphNode, NodeState, NodeTransition, ParseActionError,
    PathStep, StreamdumpGraph, ViewAction, VisibleEdge, VisibleGraph,
};
pub use model::{CodecId, EdgeId, EntityStore, GraphId, NodeId, StreamId};

// Boundary types
pub use streamdump_types;
