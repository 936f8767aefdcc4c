//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!
//! On data change:
//!     watcher.rs detects change under <root>/mappings
//!     → Resolver::reload
//!     → atomic swap of each space's snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only device data reloads at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    DataConfig, EndpointConfig, ListenerConfig, ObservabilityConfig, OutputConfig, ServerConfig,
    TimeoutConfig,
};
