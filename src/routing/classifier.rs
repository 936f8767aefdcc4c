//! Path classification.
//!
//! # Responsibilities
//! - Pick the target space a path addresses
//! - Extract the device key and the drill path after it
//! - Percent-decode segments, then normalize keys and subkeys to lower case
//!
//! # Design Decisions
//! - An explicit `/<space>/` substring wins over the generic segment scan,
//!   checked in `identifier`, `model`, `boardconfig` order
//! - With no match the space defaults to `identifier`, so extraction fails
//!   cleanly instead of guessing another space

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::device::{DeviceKey, TargetSpace};

/// A classified device request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceQuery {
    pub space: TargetSpace,
    pub key: DeviceKey,
    pub subkeys: Vec<String>,
}

/// Determine which space `path` addresses.
pub fn target_space(path: &str) -> TargetSpace {
    let lower = path.to_lowercase();

    if let Some(space) = TargetSpace::ALL
        .into_iter()
        .find(|space| lower.contains(&format!("/{}/", space.as_str())))
    {
        return space;
    }

    // Generic fallback: first segment naming a space that has a follower.
    let segments = segments(&lower);
    segments
        .windows(2)
        .find_map(|pair| pair[0].parse::<TargetSpace>().ok())
        .unwrap_or(TargetSpace::Identifier)
}

/// Classify `path`. `None` when no space name is followed by a key segment.
pub fn classify(path: &str) -> Option<DeviceQuery> {
    let space = target_space(path);
    let segments = segments(path);

    let position = segments
        .iter()
        .position(|segment| segment.eq_ignore_ascii_case(space.as_str()))?;
    let key = segments.get(position + 1)?;

    Some(DeviceQuery {
        space,
        key: DeviceKey::new(key),
        subkeys: segments[position + 2..]
            .iter()
            .map(|segment| segment.to_lowercase())
            .collect(),
    })
}

/// Split a path into its non-empty, percent-decoded segments, ignoring a
/// trailing slash. Decoding happens after the split, so `%2F` stays inside
/// its segment.
fn segments(path: &str) -> Vec<Cow<'_, str>> {
    path.strip_suffix('/')
        .unwrap_or(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy())
        .collect()
}
