//! Liveness endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::adapters::realtime::EventBroadcaster;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub connections: usize,
    pub active_locks: usize,
}

/// GET /health
pub async fn health(State(broadcaster): State<Arc<EventBroadcaster>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        connections: broadcaster.connection_count(),
        active_locks: broadcaster.list_locks().len(),
    })
}

pub fn health_routes(broadcaster: Arc<EventBroadcaster>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(broadcaster)
}
