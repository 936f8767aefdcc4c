//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Load mappings → Preload devices → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or console `exit` → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGHUP → Reload mappings and devices
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then data, then listeners
//! - Startup data failures are fatal unless safety is disabled

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bootstrap, StartupError};
