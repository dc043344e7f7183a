//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] is served at `/api-docs/openapi.json`, rendered by Swagger UI at
//! `/swagger-ui`, and exported by the `openapi-dump` binary. The committed
//! `openapi.yaml` contract is checked against it in `tests/openapi_contract_test.rs`.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::errors::ErrorResponse;
use crate::models::external_project::{
    CreateExternalProjectRequest, ExternalProjectDto, UpdateExternalProjectRequest,
};
use crate::models::user::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::routes::health::HealthStatus;

/// Name of the HTTP Basic security scheme in the document.
pub const BASIC_AUTH_SCHEME: &str = "basicAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BASIC_AUTH_SCHEME,
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "User Projects API",
        description = "Manage users and the external projects linked to them.",
        version = "1.0.0"
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("basicAuth" = [])),
    paths(
        crate::routes::users::create_user,
        crate::routes::users::get_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::external_projects::add,
        crate::routes::external_projects::list,
        crate::routes::external_projects::get_by_id,
        crate::routes::external_projects::update,
        crate::routes::external_projects::delete,
        crate::routes::health::live,
        crate::routes::health::ready,
        crate::routes::metrics::scrape,
    ),
    components(schemas(
        UserDto,
        CreateUserRequest,
        UpdateUserRequest,
        ExternalProjectDto,
        CreateExternalProjectRequest,
        UpdateExternalProjectRequest,
        ErrorResponse,
        HealthStatus,
    )),
    tags(
        (name = "users", description = "User accounts"),
        (name = "external-projects", description = "External projects owned by a user"),
        (name = "health", description = "Liveness and readiness probes"),
        (name = "observability", description = "Prometheus metrics")
    )
)]
pub struct ApiDoc;
