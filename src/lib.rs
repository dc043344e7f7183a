pub mod config;
pub mod db;
pub mod doc;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub metrics: PrometheusHandle,
}
