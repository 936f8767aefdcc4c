//! Labradorite device lookup server.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /api/v0/{space}/{key}/{subkeys..}
//!           │
//!           ▼
//!     ┌──────────┐    ┌───────────┐    ┌──────────┐    ┌─────────┐
//!     │   http   │───▶│  routing  │───▶│  device  │───▶│  drill  │
//!     │  server  │    │ classify  │    │ resolver │    │  walk   │
//!     └──────────┘    └───────────┘    └────┬─────┘    └────┬────┘
//!           ▲                               │               │
//!           │                         mappings/*.json       │
//!           │                         device documents      │
//!           └───────────────── JSON body ◀──────────────────┘
//!
//!     console (stdin) ──▶ lookup / reload / stats / exit
//!     SIGHUP, file watcher ──▶ resolver.reload()
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use labradorite::config::validation::validate_config;
use labradorite::config::watcher::{reload_on_change, DataWatcher};
use labradorite::config::{load_config, ServerConfig};
use labradorite::console::run_console;
use labradorite::lifecycle::signals::reload_on_sighup;
use labradorite::lifecycle::{bootstrap, Shutdown, StartupError};
use labradorite::observability::{logging, metrics};
use labradorite::{DeviceLookup, HttpServer};

/// Serve device documents from a data directory.
#[derive(Parser, Debug)]
#[command(name = "labradorite", version, about)]
struct Cli {
    /// Data root containing `mappings/` and the device files
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Keep serving when data fails to load
    #[arg(long)]
    disable_safety: bool,

    /// Enable the /host endpoint
    #[arg(long)]
    enable_host: bool,

    /// Listen address, e.g. 127.0.0.1:8080
    #[arg(long)]
    bind: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read console commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Reload when mapping files change
    #[arg(long)]
    watch: bool,

    /// Load device documents on first request instead of at startup
    #[arg(long)]
    no_preload: bool,
}

impl Cli {
    fn into_config(self) -> Result<(ServerConfig, bool), StartupError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(root) = self.data {
            config.data.root = root;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        config.data.disable_safety |= self.disable_safety;
        config.data.watch |= self.watch;
        config.endpoints.host_enabled |= self.enable_host;
        if self.no_preload {
            config.data.preload = false;
        }

        Ok((config, self.interactive))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, interactive) = Cli::parse().into_config()?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("labradorite v{} starting", env!("CARGO_PKG_VERSION"));

    validate_config(&config).map_err(StartupError::Validation)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_root = %config.data.root.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let resolver = bootstrap(&config.data).await?;
    let lookup = DeviceLookup::new(resolver.clone());
    let shutdown = Shutdown::new();

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    tokio::spawn(reload_on_sighup(resolver.clone()));

    // Dropping the watcher stops notifications.
    let _watcher = if config.data.watch {
        let (watcher, changes) = DataWatcher::new(&config.data.root);
        let handle = watcher.run()?;
        tokio::spawn(reload_on_change(resolver.clone(), changes));
        Some(handle)
    } else {
        None
    };

    if interactive {
        tokio::spawn(run_console(lookup.clone(), shutdown.clone()));
    }

    let server = HttpServer::new(config, lookup);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
