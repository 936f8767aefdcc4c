//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → router.rs (help / host / device / unknown endpoint)
//!     → classifier.rs (device paths: space, key, drill path)
//!     → Return: DeviceQuery or explicit failure
//! ```
//!
//! # Design Decisions
//! - Endpoint matching is case-insensitive
//! - No regex in hot path (prefix and segment matching only)
//! - Deterministic: same input always classifies the same way

pub mod classifier;
pub mod router;

pub use classifier::{classify, DeviceQuery};
pub use router::Endpoint;
