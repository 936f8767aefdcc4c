//! Walking a document through a sequence of subkeys.

use serde_json::Value;

use crate::drill::render::OutputFormat;

/// Header that selects strict drilling when set to `true`.
pub const FAIL_ON_SUBKEYS_HEADER: &str = "Labradorite-FailOnSubkeys";

/// What to do when drilling reaches a non-object before the last subkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Stop early and return the value reached so far.
    #[default]
    Lenient,
    /// Fail the request.
    Strict,
}

impl Strictness {
    /// Interpret a `Labradorite-FailOnSubkeys` header value. Only the exact
    /// value `true` enables strict mode.
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some("true") => Strictness::Strict,
            _ => Strictness::Lenient,
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Strictness::Strict)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DrillFailure {
    #[error("key {key:?} not found")]
    KeyNotFound { key: String },

    #[error("cannot drill into non-object value at {key:?}")]
    NonDictAtNonTerminal { key: String },

    #[error("failed to encode drilled value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Walk `document` through `subkeys` and return the value reached.
pub fn walk<'a, S: AsRef<str>>(
    document: &'a Value,
    subkeys: &[S],
    strictness: Strictness,
) -> Result<&'a Value, DrillFailure> {
    let mut current = document;

    for key in subkeys {
        let key = key.as_ref();
        let Value::Object(object) = current else {
            if strictness.is_strict() {
                return Err(DrillFailure::NonDictAtNonTerminal {
                    key: key.to_string(),
                });
            }
            tracing::debug!(key, "Reached a non-object before the last subkey, stopping early");
            break;
        };

        current = object.get(key).ok_or_else(|| DrillFailure::KeyNotFound {
            key: key.to_string(),
        })?;
    }

    Ok(current)
}

/// Walk `document` through `subkeys` and serialize the result.
pub fn drill<S: AsRef<str>>(
    document: &Value,
    subkeys: &[S],
    strictness: Strictness,
    format: OutputFormat,
) -> Result<Vec<u8>, DrillFailure> {
    let value = walk(document, subkeys, strictness)?;
    Ok(format.render(value)?)
}
