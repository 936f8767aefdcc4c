//! Endpoint dispatch.
//!
//! # Responsibilities
//! - Map a request path to one of the served endpoints
//! - Return an explicit `Unknown` rather than a silent default

use crate::device::TargetSpace;

/// Endpoints served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/api/v0/<space>/...` or the rolling alias `/api/<space>/...`.
    Device(TargetSpace),
    /// `/help`
    Help,
    /// `/host`
    Host,
    /// Anything else.
    Unknown,
}

impl Endpoint {
    /// Route `path`. Matching ignores ASCII case.
    pub fn route(path: &str) -> Self {
        let lower = path.to_lowercase();

        match lower.as_str() {
            "/help" => return Endpoint::Help,
            "/host" => return Endpoint::Host,
            _ => {}
        }

        for space in TargetSpace::ALL {
            let versioned = format!("/api/v0/{}/", space.as_str());
            let rolling = format!("/api/{}/", space.as_str());
            if lower.starts_with(&versioned) || lower.starts_with(&rolling) {
                return Endpoint::Device(space);
            }
        }

        Endpoint::Unknown
    }

    /// Label used in metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Device(space) => space.as_str(),
            Endpoint::Help => "help",
            Endpoint::Host => "host",
            Endpoint::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_routes() {
        assert_eq!(
            Endpoint::route("/api/v0/boardconfig/D94AP"),
            Endpoint::Device(TargetSpace::BoardConfig)
        );
        assert_eq!(
            Endpoint::route("/api/model/A3084/chips"),
            Endpoint::Device(TargetSpace::Model)
        );
        assert_eq!(
            Endpoint::route("/API/V0/IDENTIFIER/iPhone17,2"),
            Endpoint::Device(TargetSpace::Identifier)
        );
    }

    #[test]
    fn test_static_routes() {
        assert_eq!(Endpoint::route("/help"), Endpoint::Help);
        assert_eq!(Endpoint::route("/HELP"), Endpoint::Help);
        assert_eq!(Endpoint::route("/host"), Endpoint::Host);
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(Endpoint::route("/"), Endpoint::Unknown);
        assert_eq!(Endpoint::route("/api/v1/model/a3084"), Endpoint::Unknown);
        assert_eq!(Endpoint::route("/api/v0/boardconfig"), Endpoint::Unknown);
        assert_eq!(Endpoint::route("/cow"), Endpoint::Unknown);
    }
}
