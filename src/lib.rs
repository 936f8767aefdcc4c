//! Labradorite: a read-only lookup server for Apple device data.

pub mod config;
pub mod console;
pub mod device;
pub mod drill;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use lookup::DeviceLookup;
