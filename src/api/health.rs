//! Health and status endpoints

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ApiState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Skill status including the cached model
#[derive(Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub credential_configured: bool,
    pub model: Option<ModelStatus>,
    pub fallback_model: String,
}

/// Last discovered model
#[derive(Serialize)]
pub struct ModelStatus {
    pub id: String,
    pub resolved_at: DateTime<Utc>,
}

/// Liveness probe - is the service running?
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Report credential presence and the cached model, without a network call
async fn status(State(state): State<Arc<ApiState>>) -> Json<StatusResponse> {
    let resolver = state.skill.resolver();
    let model = resolver.cached().await.map(|m| ModelStatus {
        id: m.id,
        resolved_at: m.resolved_at,
    });

    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        credential_configured: state.skill.has_credential(),
        model,
        fallback_model: resolver.fallback().to_string(),
    })
}

/// Build health router (liveness only, no state needed)
pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

/// Build status router (needs state)
pub fn status_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .with_state(state)
}
