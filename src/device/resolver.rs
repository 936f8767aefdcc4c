//! Cached-or-disk device resolution.
//!
//! # Responsibilities
//! - Serve documents from the space's cache when present
//! - Fall back to the mapping table and the data root on a miss
//! - Populate the cache on the first successful disk load
//! - Eager preload and full reload of a space
//!
//! # Design Decisions
//! - No single-flight: concurrent misses for one key may each read the file,
//!   the last insert wins and every insert holds the same parse
//! - Reload replaces table and cache in one snapshot store, so old and new
//!   mapping entries never mix for a space
//! - Only one reload runs at a time; requests are never blocked by it

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::device::cache::DeviceDocument;
use crate::device::catalog::{Catalog, SpaceSnapshot};
use crate::device::mapping::{LoadFailure, MappingTable};
use crate::device::space::{DeviceKey, TargetSpace};
use crate::observability::metrics;

/// Why a device could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveFailure {
    #[error("device is not present in the mapping table")]
    UnknownDevice,

    #[error("device file {path:?} does not exist")]
    MissingFile { path: PathBuf },

    #[error("device file {path:?} could not be loaded: {reason}")]
    CorruptData { path: PathBuf, reason: String },
}

/// One or more device files failed during an eager preload.
#[derive(Debug, thiserror::Error)]
#[error("{} device file(s) failed to preload for {space}", .failures.len())]
pub struct PreloadFailure {
    pub space: TargetSpace,
    pub failures: Vec<(DeviceKey, ResolveFailure)>,
}

/// Why a space could not be (re)loaded.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error(transparent)]
    Table(#[from] LoadFailure),

    #[error(transparent)]
    Preload(#[from] PreloadFailure),
}

/// Policy applied when loading spaces.
#[derive(Debug, Clone, Copy)]
pub struct LoadPolicy {
    /// Load every mapped document when a space is (re)loaded.
    pub preload: bool,
    /// Accept partial data instead of failing.
    pub disable_safety: bool,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            preload: true,
            disable_safety: false,
        }
    }
}

/// Size of one space's published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceStats {
    pub entries: usize,
    pub cached: usize,
}

/// Outcome of a full reload, per space.
#[derive(Debug)]
pub struct ReloadReport {
    pub outcomes: Vec<(TargetSpace, Result<SpaceStats, ReloadError>)>,
}

impl ReloadReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_ok())
    }
}

impl fmt::Display for ReloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (space, outcome)) in self.outcomes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match outcome {
                Ok(stats) => write!(
                    f,
                    "{space}: reloaded {} mappings, {} cached",
                    stats.entries, stats.cached
                )?,
                Err(e) => write!(f, "{space}: kept previous table ({e})")?,
            }
        }
        Ok(())
    }
}

/// Resolves device documents for all target spaces.
#[derive(Debug)]
pub struct Resolver {
    root: PathBuf,
    catalog: Catalog,
    policy: LoadPolicy,
    reload_lock: Mutex<()>,
}

impl Resolver {
    /// A resolver over `root` with empty tables. Call [`Resolver::reload`]
    /// or publish snapshots before serving.
    pub fn new(root: impl Into<PathBuf>, policy: LoadPolicy) -> Self {
        Self {
            root: root.into(),
            catalog: Catalog::empty(),
            policy,
            reload_lock: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve `key` in `space`, consulting the cache first.
    pub async fn resolve(
        &self,
        space: TargetSpace,
        key: &DeviceKey,
    ) -> Result<DeviceDocument, ResolveFailure> {
        let snapshot = self.catalog.snapshot(space);

        if let Some(document) = snapshot.cache.get(key) {
            metrics::record_cache_lookup(space, true);
            tracing::trace!(space = %space, key = %key, "Cache hit");
            return Ok(document);
        }
        metrics::record_cache_lookup(space, false);

        let relative = snapshot
            .table
            .get(key)
            .ok_or(ResolveFailure::UnknownDevice)?;

        tracing::debug!(space = %space, key = %key, file = %relative, "Cache miss, reading from disk");
        let document = read_document(&self.root.join(relative)).await?;

        snapshot.cache.insert(key.clone(), document.clone());
        metrics::record_cached_devices(space, snapshot.cache.len());
        Ok(document)
    }

    /// Eagerly load every mapped document of the currently published
    /// snapshot for `space`.
    ///
    /// Documents that load successfully stay cached even when the preload
    /// as a whole fails.
    pub async fn preload_all(&self, space: TargetSpace) -> Result<usize, PreloadFailure> {
        let snapshot = self.catalog.snapshot(space);
        self.preload_into(space, &snapshot).await
    }

    async fn preload_into(
        &self,
        space: TargetSpace,
        snapshot: &SpaceSnapshot,
    ) -> Result<usize, PreloadFailure> {
        let mut failures = Vec::new();

        for (key, relative) in snapshot.table.iter() {
            match read_document(&self.root.join(relative)).await {
                Ok(document) => snapshot.cache.insert(key.clone(), document),
                Err(e) => {
                    tracing::warn!(space = %space, key = %key, error = %e, "Preload failed for device");
                    failures.push((key.clone(), e));
                }
            }
        }

        metrics::record_cached_devices(space, snapshot.cache.len());

        if failures.is_empty() {
            tracing::info!(space = %space, devices = snapshot.cache.len(), "Devices preloaded");
            Ok(snapshot.cache.len())
        } else {
            Err(PreloadFailure { space, failures })
        }
    }

    /// Build a fresh snapshot for `space` from disk according to the policy.
    /// Nothing is published.
    pub async fn load_space(&self, space: TargetSpace) -> Result<SpaceSnapshot, ReloadError> {
        let table = MappingTable::load(&self.root, space).await?;
        let snapshot = SpaceSnapshot::new(table);

        if self.policy.preload {
            if let Err(failure) = self.preload_into(space, &snapshot).await {
                if !self.policy.disable_safety {
                    return Err(failure.into());
                }
                tracing::warn!(
                    space = %space,
                    failed = failure.failures.len(),
                    "Safety disabled, continuing with partial device data"
                );
            }
        }

        Ok(snapshot)
    }

    /// Reload every space from disk.
    ///
    /// A space whose load fails keeps its previously published snapshot.
    pub async fn reload(&self) -> ReloadReport {
        let _guard = self.reload_lock.lock().await;
        tracing::info!(root = %self.root.display(), "Reloading mappings and devices");

        let mut outcomes = Vec::with_capacity(TargetSpace::ALL.len());
        for space in TargetSpace::ALL {
            let outcome = match self.load_space(space).await {
                Ok(snapshot) => {
                    let stats = SpaceStats {
                        entries: snapshot.table.len(),
                        cached: snapshot.cache.len(),
                    };
                    self.catalog.publish(space, snapshot);
                    metrics::record_cached_devices(space, stats.cached);
                    Ok(stats)
                }
                Err(e) => {
                    tracing::error!(space = %space, error = %e, "Reload failed, keeping previous table");
                    Err(e)
                }
            };
            outcomes.push((space, outcome));
        }

        let report = ReloadReport { outcomes };
        metrics::record_reload(report.is_success());
        report
    }

    /// Current table size and cached-document count for `space`.
    pub fn stats(&self, space: TargetSpace) -> SpaceStats {
        let snapshot = self.catalog.snapshot(space);
        SpaceStats {
            entries: snapshot.table.len(),
            cached: snapshot.cache.len(),
        }
    }
}

/// Read and parse one device document.
async fn read_document(path: &Path) -> Result<DeviceDocument, ResolveFailure> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ResolveFailure::MissingFile {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ResolveFailure::CorruptData {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| ResolveFailure::CorruptData {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(Arc::new(value))
}
