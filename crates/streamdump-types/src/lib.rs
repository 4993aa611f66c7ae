//! Shared Wire Types for Streamdump Visualization
//!
//! This crate is the SINGLE SOURCE OF TRUTH for all types crossing the
//! engine boundary.
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────────┐  SerializedStreamdump  ┌──────────────────┐  StreamdumpView  ┌──────────────┐
//! │  Trace producer  │ ─────────────────────► │  streamdump-viz  │ ───────────────► │  Renderer    │
//! └──────────────────┘                        └──────────────────┘                  └──────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. Input types mirror the serialized trace, camelCase field names
//! 2. Tagged enums only: `#[serde(tag = "type")]`
//! 3. Identifiers cross the boundary as display strings (`C3`, `G1`, `S7`)

pub mod trace;
pub mod view;

pub use trace::*;
pub use view::*;
