//! OS signal handling.
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers a data reload, not shutdown

use std::sync::Arc;

use crate::device::Resolver;

/// Reload `resolver` on every SIGHUP. Returns when the signal stream ends.
#[cfg(unix)]
pub async fn reload_on_sighup(resolver: Arc<Resolver>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangups = match signal(SignalKind::hangup()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGHUP handler");
            return;
        }
    };

    while hangups.recv().await.is_some() {
        tracing::info!("SIGHUP received, reloading mappings and devices");
        let report = resolver.reload().await;
        if report.is_success() {
            tracing::info!("{}", report);
        } else {
            tracing::error!("Reload incomplete:\n{}", report);
        }
    }
}

#[cfg(not(unix))]
pub async fn reload_on_sighup(_resolver: Arc<Resolver>) {}
