//! Mapping tables: device key → relative path of the device document.
//!
//! # Responsibilities
//! - Read `<root>/mappings/<space>s.json`
//! - Reject the whole table if any value is not a string
//! - Reject values that are absolute or climb out of the data root
//! - Normalize keys to lower case
//!
//! # Design Decisions
//! - A table is immutable once built; reload builds a new one
//! - Load failures are typed so startup can decide whether they are fatal

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;

use crate::device::space::{DeviceKey, TargetSpace};

/// Directory under the data root that holds the mapping files.
pub const MAPPINGS_DIR: &str = "mappings";

/// Why a mapping table could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadFailure {
    #[error("mapping file {path:?} is not present")]
    Missing { path: PathBuf },

    #[error("mapping file {path:?} could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("mapping file {path:?} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("mapping file {path:?} is not a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("mapping file {path:?} maps {key:?} to a non-string value")]
    NonStringValue { path: PathBuf, key: String },

    #[error("mapping file {path:?} maps {key:?} outside the data root: {value:?}")]
    OutsideRoot {
        path: PathBuf,
        key: String,
        value: String,
    },
}

/// Key → relative file path index for one target space.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<DeviceKey, String>,
}

impl MappingTable {
    /// Path of the mapping file for `space` under `root`.
    pub fn file_path(root: &Path, space: TargetSpace) -> PathBuf {
        root.join(MAPPINGS_DIR).join(space.mapping_file())
    }

    /// Load the mapping table for `space` from disk.
    pub async fn load(root: &Path, space: TargetSpace) -> Result<Self, LoadFailure> {
        let path = Self::file_path(root, space);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadFailure::Missing { path });
            }
            Err(source) => return Err(LoadFailure::Unreadable { path, source }),
        };

        let table = Self::from_slice(&path, &bytes)?;
        tracing::info!(
            space = %space,
            path = %path.display(),
            entries = table.len(),
            "Mapping table loaded"
        );
        Ok(table)
    }

    /// Parse a flat `{ "key": "relative/path.json" }` object.
    pub fn from_slice(path: &Path, bytes: &[u8]) -> Result<Self, LoadFailure> {
        let value: Value = serde_json::from_slice(bytes).map_err(|source| LoadFailure::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let Value::Object(object) = value else {
            return Err(LoadFailure::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        let mut entries = HashMap::with_capacity(object.len());
        for (key, value) in object {
            match value {
                Value::String(relative) => {
                    if !is_contained(&relative) {
                        return Err(LoadFailure::OutsideRoot {
                            path: path.to_path_buf(),
                            key,
                            value: relative,
                        });
                    }
                    if let Some(previous) = entries.insert(DeviceKey::new(&key), relative) {
                        tracing::warn!(
                            path = %path.display(),
                            key = %key,
                            replaced = %previous,
                            "Mapping key differs from another only by case, keeping the later entry"
                        );
                    }
                }
                _ => {
                    return Err(LoadFailure::NonStringValue {
                        path: path.to_path_buf(),
                        key,
                    })
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &DeviceKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DeviceKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// True when `relative` stays below the directory it is joined onto.
fn is_contained(relative: &str) -> bool {
    Path::new(relative)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

impl FromIterator<(DeviceKey, String)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (DeviceKey, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
