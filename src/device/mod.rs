//! Device data subsystem.
//!
//! # Data Flow
//! ```text
//! <root>/mappings/<space>s.json
//!     → mapping.rs (flat key → relative path table)
//!     → catalog.rs (table + cache per space, swapped atomically)
//!
//! resolve(space, key)
//!     → cache.rs hit → document
//!     → miss → table lookup → <root>/<path> → parse → cache insert → document
//! ```
//!
//! # Design Decisions
//! - Documents are parsed once and shared as `Arc<Value>`; nobody mutates them
//! - A space's table and cache are replaced together, never merged

pub mod cache;
pub mod catalog;
pub mod mapping;
pub mod resolver;
pub mod space;

pub use cache::{DeviceCache, DeviceDocument};
pub use catalog::{Catalog, SpaceSnapshot};
pub use mapping::{LoadFailure, MappingTable};
pub use resolver::{
    LoadPolicy, PreloadFailure, ReloadError, ReloadReport, ResolveFailure, Resolver, SpaceStats,
};
pub use space::{DeviceKey, TargetSpace};
