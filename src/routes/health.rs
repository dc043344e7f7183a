//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}

/// Liveness probe. Returns OK while the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    operation_id = "liveness",
    security(()),
    responses((status = 200, description = "Process is running", body = String))
)]
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe backed by a database round trip.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    operation_id = "readiness",
    security(()),
    responses(
        (status = 200, description = "Ready to serve traffic", body = HealthStatus),
        (status = 503, description = "Database unreachable", body = HealthStatus)
    )
)]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "UP".to_string(),
                database: "UP".to_string(),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    status: "DOWN".to_string(),
                    database: "DOWN".to_string(),
                }),
            )
        }
    }
}
