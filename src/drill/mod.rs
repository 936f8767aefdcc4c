//! Nested-key drilling into device documents.
//!
//! # Data Flow
//! ```text
//! document + [subkey, ...] + strictness
//!     → engine.rs (walk objects key by key)
//!     → render.rs (serialize the reached value)
//!     → JSON bytes
//! ```
//!
//! # Design Decisions
//! - A missing key always fails, regardless of strictness
//! - Lenient mode stops at the first non-object and returns what it reached
//! - Output is always valid JSON, scalars included

pub mod engine;
pub mod render;

pub use engine::{drill, walk, DrillFailure, Strictness};
pub use render::OutputFormat;
