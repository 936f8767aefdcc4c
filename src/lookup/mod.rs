//! The resolution pipeline shared by the HTTP and console front ends.
//!
//! # Data Flow
//! ```text
//! path + strictness
//!     → routing::classify (space, key, subkeys)
//!     → device::Resolver (cache or disk)
//!     → drill::drill (subkeys, strictness)
//!     → Ok(JSON bytes) | Err(LookupError)
//! ```

pub mod error;

use std::sync::Arc;

use crate::device::Resolver;
use crate::drill::{self, OutputFormat, Strictness};
use crate::routing::classify;

pub use error::LookupError;

/// Front-end independent device lookup.
#[derive(Debug, Clone)]
pub struct DeviceLookup {
    resolver: Arc<Resolver>,
}

impl DeviceLookup {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    /// Run the full pipeline for a device path.
    pub async fn lookup(
        &self,
        path: &str,
        strictness: Strictness,
        format: OutputFormat,
    ) -> Result<Vec<u8>, LookupError> {
        let query = classify(path).ok_or_else(|| LookupError::BadRequest {
            path: path.to_string(),
        })?;

        let document = self.resolver.resolve(query.space, &query.key).await?;
        let body = drill::drill(&document, &query.subkeys, strictness, format)?;

        tracing::debug!(
            space = %query.space,
            key = %query.key,
            depth = query.subkeys.len(),
            bytes = body.len(),
            "Lookup resolved"
        );
        Ok(body)
    }
}
