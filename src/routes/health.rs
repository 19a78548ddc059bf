//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.
//! Used by Kubernetes, ECS, systemd, and load balancers to verify the service is alive.

use axum::{extract::State, Json};

use crate::service::HealthStatus;
use crate::state::AppState;

/// Health check handler.
///
/// Returns `{"status":"ok"}` to indicate the service is running. This is a
/// liveness probe - it only checks that the process can respond to HTTP.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.service.health())
}
