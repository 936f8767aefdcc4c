//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, client IP, access log)
//!     → routing::Endpoint (help / host / device / unknown)
//!     → lookup::DeviceLookup (device endpoints)
//!     → response.rs (status + fixed body, JSON headers)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{client_ip, MakeRequestUuidV4};
pub use server::{AppState, HttpServer};
