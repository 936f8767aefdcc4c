//! Target spaces and device keys.

use std::fmt;
use std::str::FromStr;

/// One of the three key spaces a device can be addressed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetSpace {
    /// Model identifier, e.g. `iPhone17,2`.
    Identifier,
    /// Model number, e.g. `A3084`.
    Model,
    /// Board configuration, e.g. `D94AP`.
    BoardConfig,
}

impl TargetSpace {
    /// All spaces, in classifier precedence order.
    pub const ALL: [TargetSpace; 3] = [
        TargetSpace::Identifier,
        TargetSpace::Model,
        TargetSpace::BoardConfig,
    ];

    /// Segment name used in request paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetSpace::Identifier => "identifier",
            TargetSpace::Model => "model",
            TargetSpace::BoardConfig => "boardconfig",
        }
    }

    /// Mapping file name under `<root>/mappings/`.
    pub fn mapping_file(&self) -> String {
        format!("{}s.json", self.as_str())
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            TargetSpace::Identifier => 0,
            TargetSpace::Model => 1,
            TargetSpace::BoardConfig => 2,
        }
    }
}

impl fmt::Display for TargetSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target space: {0}")]
pub struct UnknownSpace(pub String);

impl FromStr for TargetSpace {
    type Err = UnknownSpace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetSpace::ALL
            .into_iter()
            .find(|space| space.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSpace(s.to_string()))
    }
}

/// Case-insensitive device key. Stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceKey(String);

impl DeviceKey {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
