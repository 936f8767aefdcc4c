//! Lookup failure taxonomy and the fixed messages shown to clients.

use axum::http::StatusCode;

use crate::device::ResolveFailure;
use crate::drill::DrillFailure;

pub const BAD_ENDPOINT: &str = "Specs machine doesn't have that endpoint. Try requesting /help.";
pub const BAD_METHOD: &str = "Specs machine doesn't allow that method.";
pub const BAD_REQUEST: &str = "Specs machine didn't understand that request.";
pub const BAD_KEY: &str = "Specs machine couldn't find that property.";
pub const BAD_DEVICE: &str = "Specs machine couldn't find that device.";
pub const BAD_DATA_READ: &str = "Specs machine encountered some bad data while trying to read files.";
pub const BAD_DATA_WRITE: &str = "Specs machine encountered some bad data while trying to write files.";
pub const BAD_PATH: &str = "Specs machine couldn't find the file it was looking for.";

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request path {path:?} does not name a device")]
    BadRequest { path: String },

    #[error("no such endpoint")]
    UnknownEndpoint,

    #[error("method {0} is not supported")]
    UnsupportedMethod(String),

    #[error(transparent)]
    Resolve(#[from] ResolveFailure),

    #[error(transparent)]
    Drill(#[from] DrillFailure),
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::BadRequest { .. } | LookupError::UnknownEndpoint => StatusCode::BAD_REQUEST,
            LookupError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
            LookupError::Resolve(ResolveFailure::UnknownDevice) => StatusCode::NOT_FOUND,
            LookupError::Resolve(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LookupError::Drill(DrillFailure::Encode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            LookupError::Drill(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Fixed, human-readable body for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            LookupError::BadRequest { .. } => BAD_REQUEST,
            LookupError::UnknownEndpoint => BAD_ENDPOINT,
            LookupError::UnsupportedMethod(_) => BAD_METHOD,
            LookupError::Resolve(ResolveFailure::UnknownDevice) => BAD_DEVICE,
            LookupError::Resolve(ResolveFailure::MissingFile { .. }) => BAD_PATH,
            LookupError::Resolve(ResolveFailure::CorruptData { .. }) => BAD_DATA_READ,
            LookupError::Drill(DrillFailure::Encode(_)) => BAD_DATA_WRITE,
            LookupError::Drill(_) => BAD_KEY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LookupError::BadRequest { path: "/".into() }, 400, BAD_REQUEST),
            (LookupError::UnknownEndpoint, 400, BAD_ENDPOINT),
            (LookupError::UnsupportedMethod("POST".into()), 405, BAD_METHOD),
            (ResolveFailure::UnknownDevice.into(), 404, BAD_DEVICE),
            (
                ResolveFailure::MissingFile { path: PathBuf::from("devices/x.json") }.into(),
                500,
                BAD_PATH,
            ),
            (
                ResolveFailure::CorruptData {
                    path: PathBuf::from("devices/x.json"),
                    reason: "eof".into(),
                }
                .into(),
                500,
                BAD_DATA_READ,
            ),
            (DrillFailure::KeyNotFound { key: "gpu".into() }.into(), 400, BAD_KEY),
            (DrillFailure::NonDictAtNonTerminal { key: "soc".into() }.into(), 400, BAD_KEY),
        ];

        for (error, status, message) in cases {
            assert_eq!(error.status().as_u16(), status, "{error}");
            assert_eq!(error.message(), message, "{error}");
        }
    }
}
