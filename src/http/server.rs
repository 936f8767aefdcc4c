//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single dispatch handler
//! - Wire up middleware (tracing, timeout, request ID, JSON headers, access log)
//! - Bind server to listener
//! - Reject non-GET methods before any routing work
//! - Dispatch device paths to the lookup pipeline

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{EndpointConfig, ServerConfig};
use crate::drill::engine::FAIL_ON_SUBKEYS_HEADER;
use crate::drill::{OutputFormat, Strictness};
use crate::http::request::{access_log, MakeRequestUuidV4};
use crate::http::response::{host_info, HELP_TEXT, MARKER_HEADER, MARKER_VALUE};
use crate::lifecycle::shutdown::wait_for_shutdown;
use crate::lookup::{DeviceLookup, LookupError};
use crate::routing::Endpoint;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub lookup: DeviceLookup,
    pub endpoints: EndpointConfig,
    pub format: OutputFormat,
}

/// HTTP server for the device API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, lookup: DeviceLookup) -> Self {
        let state = AppState {
            lookup,
            endpoints: config.endpoints.clone(),
            format: OutputFormat::from_pretty(config.output.pretty),
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(api_handler))
            .route("/", any(api_handler))
            .with_state(state)
            .layer(middleware::from_fn(access_log))
            .layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ))
            .layer(SetResponseHeaderLayer::overriding(MARKER_HEADER, MARKER_VALUE))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The configured router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every path and method.
async fn api_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    match dispatch(&state, &method, uri.path(), &headers).await {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn dispatch(
    state: &AppState,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> Result<Vec<u8>, LookupError> {
    if *method != Method::GET {
        return Err(LookupError::UnsupportedMethod(method.to_string()));
    }

    match Endpoint::route(path) {
        Endpoint::Help => Ok(HELP_TEXT.as_bytes().to_vec()),
        Endpoint::Host if state.endpoints.host_enabled => host_info(state.format),
        Endpoint::Host | Endpoint::Unknown => Err(LookupError::UnknownEndpoint),
        Endpoint::Device(_) => {
            let strictness = Strictness::from_header(
                headers
                    .get(FAIL_ON_SUBKEYS_HEADER)
                    .and_then(|v| v.to_str().ok()),
            );
            state.lookup.lookup(path, strictness, state.format).await
        }
    }
}
