//! Data-root watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::device::mapping::MAPPINGS_DIR;
use crate::device::Resolver;

/// Window in which bursts of file events collapse into one reload.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// A watcher that monitors `<root>/mappings` for changes.
pub struct DataWatcher {
    path: PathBuf,
    change_tx: mpsc::UnboundedSender<()>,
}

impl DataWatcher {
    /// Create a new DataWatcher.
    ///
    /// Returns the watcher and a receiver that yields one message per change.
    pub fn new(root: &Path) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (change_tx, change_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: root.join(MAPPINGS_DIR),
                change_tx,
            },
            change_rx,
        )
    }

    /// Start watching in a background thread. The returned watcher must be
    /// kept alive for events to flow.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.change_tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove() {
                        tracing::debug!(paths = ?event.paths, "Data change detected");
                        let _ = tx.send(());
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Data watcher started");
        Ok(watcher)
    }
}

/// Reload `resolver` whenever `changes` fires, coalescing bursts.
pub async fn reload_on_change(resolver: Arc<Resolver>, mut changes: mpsc::UnboundedReceiver<()>) {
    while changes.recv().await.is_some() {
        tokio::time::sleep(DEBOUNCE).await;
        while changes.try_recv().is_ok() {}

        tracing::info!("Mapping change detected, reloading...");
        let report = resolver.reload().await;
        if report.is_success() {
            tracing::info!("{}", report);
        } else {
            tracing::error!("Reload incomplete:\n{}", report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceKey, LoadPolicy, TargetSpace};
    use std::fs;

    #[tokio::test]
    async fn test_change_signal_triggers_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mappings = dir.path().join(MAPPINGS_DIR);
        fs::create_dir_all(&mappings).unwrap();
        for space in TargetSpace::ALL {
            fs::write(mappings.join(space.mapping_file()), "{}").unwrap();
        }

        let resolver = Arc::new(Resolver::new(
            dir.path(),
            LoadPolicy { preload: false, disable_safety: false },
        ));
        assert!(resolver.reload().await.is_success());

        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(reload_on_change(resolver.clone(), rx));

        fs::write(mappings.join("models.json"), r#"{"A3084": "devices/a3084.json"}"#).unwrap();
        tx.send(()).unwrap();
        tx.send(()).unwrap();
        drop(tx);
        task.await.unwrap();

        let snapshot = resolver.catalog().snapshot(TargetSpace::Model);
        assert_eq!(snapshot.table.get(&DeviceKey::new("a3084")), Some("devices/a3084.json"));
    }
}
