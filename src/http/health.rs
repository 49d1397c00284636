//! Liveness endpoint, present in every application.

use std::time::Instant;

use axum::{extract::State, http::header, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Seconds since the application was built.
    pub uptime: u64,
}

#[derive(Debug, Clone, Copy)]
struct HealthState {
    started_at: Instant,
}

pub(crate) fn router(started_at: Instant) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health_handler))
        .with_state(HealthState { started_at })
}

async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs(),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
