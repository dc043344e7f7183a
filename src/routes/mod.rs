//! Route definitions and router assembly for the user projects API.

pub mod external_projects;
pub mod health;
pub mod metrics;
pub mod users;

use axum::{
    http::{HeaderValue, Uri},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::errors::AppError;
use crate::middleware::{
    auth::require_auth, metrics::track_metrics, request_path::attach_request_path,
};
use crate::AppState;

/// Maximum accepted request body: 1 MiB.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Routes under `/api`, all of which require Basic credentials.
fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users", axum::routing::post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/{id}/external-projects",
            get(external_projects::list).post(external_projects::add),
        )
        .route(
            "/users/{id}/external-projects/{project_id}",
            get(external_projects::get_by_id)
                .put(external_projects::update)
                .delete(external_projects::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth))
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origin = match frontend_url.parse::<HeaderValue>() {
        Ok(value) => AllowOrigin::from(value),
        Err(_) => {
            tracing::warn!(frontend_url, "FRONTEND_URL is not a valid origin, allowing any");
            AllowOrigin::from(Any)
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No handler found for {}", uri.path()))
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(&state))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/metrics", get(metrics::scrape))
        .route_layer(from_fn(track_metrics))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(from_fn(attach_request_path))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.frontend_url))
        .with_state(state)
}
