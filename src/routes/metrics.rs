//! Prometheus scrape endpoint.

use axum::{extract::State, http::header, response::IntoResponse};

use crate::telemetry;
use crate::AppState;

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// GET /metrics: Prometheus text exposition.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "observability",
    operation_id = "scrapeMetrics",
    security(()),
    responses((status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain"))
)]
pub async fn scrape(State(state): State<AppState>) -> impl IntoResponse {
    telemetry::record_pool_stats(&state.db);
    state.metrics.run_upkeep();
    (
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        state.metrics.render(),
    )
}
