//! HTTP API server for the skill

pub mod health;
pub mod skill;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::skill::Skill;

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub skill: Arc<Skill>,
    /// Expected `applicationId` (None = accept any envelope)
    pub application_id: Option<String>,
}

/// HTTP server exposing the skill endpoint
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    /// Create a server for `skill` on `port`
    #[must_use]
    pub fn new(skill: Arc<Skill>, port: u16, application_id: Option<String>) -> Self {
        Self {
            state: Arc::new(ApiState {
                skill,
                application_id,
            }),
            port,
        }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Run the API server until ctrl-c
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        tracing::info!("API server stopped");
        Ok(())
    }
}

/// Build the full router for `state`
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(skill::router(state.clone()))
        .merge(health::router())
        .merge(health::status_router(state))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
