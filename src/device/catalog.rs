//! Per-space snapshots of mapping table + cache, published atomically.
//!
//! # Design Decisions
//! - Table and cache of one space travel together in a [`SpaceSnapshot`]
//! - Readers `load()` a snapshot once per request and never see a half-built one
//! - Reload stores a whole new snapshot; the retired one drops with its last reader

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::device::cache::DeviceCache;
use crate::device::mapping::MappingTable;
use crate::device::space::TargetSpace;

/// One generation of state for a target space.
#[derive(Debug, Default)]
pub struct SpaceSnapshot {
    pub table: MappingTable,
    pub cache: DeviceCache,
}

impl SpaceSnapshot {
    /// A snapshot with `table` and an empty cache.
    pub fn new(table: MappingTable) -> Self {
        Self {
            table,
            cache: DeviceCache::new(),
        }
    }
}

/// The shared device catalog for all three spaces.
#[derive(Debug)]
pub struct Catalog {
    spaces: [ArcSwap<SpaceSnapshot>; 3],
}

impl Catalog {
    /// A catalog with empty tables for every space.
    pub fn empty() -> Self {
        Self {
            spaces: std::array::from_fn(|_| ArcSwap::from_pointee(SpaceSnapshot::default())),
        }
    }

    /// Current snapshot for `space`.
    pub fn snapshot(&self, space: TargetSpace) -> Arc<SpaceSnapshot> {
        self.spaces[space.index()].load_full()
    }

    /// Atomically replace the snapshot for `space`.
    pub fn publish(&self, space: TargetSpace, snapshot: SpaceSnapshot) {
        self.spaces[space.index()].store(Arc::new(snapshot));
        tracing::debug!(space = %space, "Snapshot published");
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}
