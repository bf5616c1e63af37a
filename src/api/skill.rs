//! Voice platform endpoint

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use super::ApiState;
use crate::skill::{RequestEnvelope, ResponseEnvelope};

/// Check the envelope is addressed to the configured application
fn verify_application(state: &ApiState, envelope: &RequestEnvelope) -> Result<(), StatusCode> {
    let Some(expected) = &state.application_id else {
        return Ok(());
    };

    match envelope.application_id() {
        Some(id) if id == expected => Ok(()),
        Some(id) => {
            tracing::warn!(application_id = id, "envelope for another application");
            Err(StatusCode::FORBIDDEN)
        }
        None => {
            tracing::debug!("envelope without application id");
            Err(StatusCode::FORBIDDEN)
        }
    }
}

/// Handle a request envelope from the voice platform
///
/// Answers 200 with a response envelope once the application id checks out;
/// failures after that point are spoken.
pub async fn handle_request(
    State(state): State<Arc<ApiState>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, StatusCode> {
    verify_application(&state, &envelope)?;

    let response = state.skill.handle(&envelope).await;
    Ok(Json(response.into_envelope()))
}

/// Build the skill router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/skill", post(handle_request))
        .with_state(state)
}
