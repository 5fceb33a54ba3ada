//! Application router builder.
//!
//! Used by both the binary and the integration tests so they exercise the
//! same routes.

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::adapters::realtime::EventBroadcaster;
use crate::adapters::websocket::{websocket_router, WebSocketState};
use crate::config::{RealtimeConfig, ServerConfig};
use crate::ports::AirlineRepository;

use super::airline::{flight_routes, passenger_routes, AirlineHandlers};
use super::events::{events_routes, EventStreamState};
use super::health::health_routes;
use super::locks::{lock_routes, LockHandlers};

/// Per-subscriber transport settings.
#[derive(Debug, Clone, Copy)]
pub struct StreamSettings {
    pub sink_buffer: usize,
    pub keep_alive: Duration,
}

impl From<&RealtimeConfig> for StreamSettings {
    fn from(config: &RealtimeConfig) -> Self {
        Self {
            sink_buffer: config.sink_buffer,
            keep_alive: config.keep_alive(),
        }
    }
}

/// Everything the routes need.
#[derive(Clone)]
pub struct ApiDependencies {
    pub broadcaster: Arc<EventBroadcaster>,
    pub repository: Arc<dyn AirlineRepository>,
    pub stream: StreamSettings,
}

/// Builds all routes without middleware.
///
/// ```text
/// /health
/// /api/events              SSE
/// /api/ws                  WebSocket
/// /api/seat-locks[/:seat_id]
/// /api/flights[/:id[/passengers]]
/// /api/passengers/:id[/check-in|/seat]
/// ```
pub fn api_router(deps: ApiDependencies) -> Router {
    let airline = AirlineHandlers::new(deps.repository.clone(), deps.broadcaster.clone());

    let events = EventStreamState {
        broadcaster: deps.broadcaster.clone(),
        sink_buffer: deps.stream.sink_buffer,
        keep_alive: deps.stream.keep_alive,
    };
    let ws = WebSocketState::new(deps.broadcaster.clone(), deps.stream.sink_buffer);

    let api = Router::new()
        .merge(events_routes(events))
        .merge(websocket_router().with_state(ws))
        .nest("/seat-locks", lock_routes(LockHandlers::new(deps.broadcaster.clone())))
        .nest("/flights", flight_routes(airline.clone()))
        .nest("/passengers", passenger_routes(airline));

    Router::new()
        .merge(health_routes(deps.broadcaster))
        .nest("/api", api)
}

/// Wraps a router with the HTTP middleware stack.
///
/// The middleware stack is applied bottom-up:
///
/// 1. CORS
/// 2. Structured request/response tracing
/// 3. Request timeout (response headers only, streams are not cut)
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(build_cors_layer(config))
}

/// Build the CORS middleware layer from server configuration.
///
/// With no origins configured every origin is allowed. Origins that are not
/// valid header values are skipped with a warning.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let configured = config.allowed_origins();
    if configured.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
