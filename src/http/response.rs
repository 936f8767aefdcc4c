//! Response emission.
//!
//! # Responsibilities
//! - Map lookup failures to status codes and fixed bodies
//! - Provide the static `/help` and `/host` bodies
//!
//! # Design Decisions
//! - Error bodies are fixed human-readable strings, not JSON objects
//! - Every response is labelled `application/json` by the server layer

use axum::{
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::drill::OutputFormat;
use crate::lookup::LookupError;

/// Marker header attached to every response.
pub const MARKER_HEADER: HeaderName = HeaderName::from_static("cow");
pub const MARKER_VALUE: HeaderValue = HeaderValue::from_static("true");

pub const HELP_TEXT: &str = "\
Welcome to the Labradorite API server.

Available endpoints:

/api/v0/identifier
  - Returns a JSON based on the provided model identifier (i.e. iPhone17,2)
  - Rolling release endpoint is available at /api/identifier
/api/v0/model
  - Returns a JSON based on the provided model number (i.e. A3084)
  - Rolling release endpoint is available at /api/model
/api/v0/boardconfig
  - Returns a JSON based on the provided boardconfig (i.e. D94AP)
  - Rolling release endpoint is available at /api/boardconfig

Notes on endpoints:

All endpoints support drilling. You can supply nested key names to only return those values.
  - /api/boardconfig/D94AP will return the full json for \"D94AP\".
  - /api/boardconfig/D94AP/chips/soc will return the value for \"chips.soc\" in the json for \"D94AP\".
Drilling stops at the first non-object value unless the request sets
  Labradorite-FailOnSubkeys: true
in which case the request fails instead.
";

/// Body for `/host`.
pub fn host_info(format: OutputFormat) -> Result<Vec<u8>, LookupError> {
    let info = json!({
        "server_host": std::env::consts::OS,
        "server_version": env!("CARGO_PKG_VERSION"),
    });
    format
        .render(&info)
        .map_err(|e| LookupError::Drill(e.into()))
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Lookup failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Lookup rejected");
        }
        (status, self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use crate::device::ResolveFailure;

    #[test]
    fn test_failure_response() {
        let response = LookupError::from(ResolveFailure::UnknownDevice).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_host_info_shape() {
        let body = host_info(OutputFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["server_version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(value["server_host"], std::env::consts::OS);
    }
}
