//! External project routes nested under a user: `/api/users/{id}/external-projects`.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::{AppError, ErrorResponse};
use crate::middleware::extract::{ApiPath, ValidatedJson};
use crate::models::external_project::{
    CreateExternalProjectRequest, ExternalProjectDto, UpdateExternalProjectRequest,
};
use crate::services::external_project as project_service;
use crate::AppState;

/// POST /api/users/{id}/external-projects
#[utoipa::path(
    post,
    path = "/api/users/{id}/external-projects",
    tag = "external-projects",
    operation_id = "addExternalProject",
    params(("id" = i64, Path, description = "Owning user ID")),
    request_body = CreateExternalProjectRequest,
    responses(
        (status = 201, description = "Project added", body = ExternalProjectDto),
        (status = 400, description = "Request validation failed", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Project already exists for this user", body = ErrorResponse)
    )
)]
pub async fn add(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ValidatedJson(body): ValidatedJson<CreateExternalProjectRequest>,
) -> Result<(StatusCode, Json<ExternalProjectDto>), AppError> {
    let project = project_service::add_project(&state.db, user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/users/{id}/external-projects
#[utoipa::path(
    get,
    path = "/api/users/{id}/external-projects",
    tag = "external-projects",
    operation_id = "getExternalProjects",
    params(("id" = i64, Path, description = "Owning user ID")),
    responses(
        (status = 200, description = "Projects of the user", body = [ExternalProjectDto]),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Vec<ExternalProjectDto>>, AppError> {
    let projects = project_service::list_projects(&state.db, user_id).await?;
    Ok(Json(projects))
}

/// GET /api/users/{id}/external-projects/{project_id}
#[utoipa::path(
    get,
    path = "/api/users/{id}/external-projects/{project_id}",
    tag = "external-projects",
    operation_id = "getExternalProject",
    params(
        ("id" = i64, Path, description = "Owning user ID"),
        ("project_id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ExternalProjectDto),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath((user_id, project_id)): ApiPath<(i64, String)>,
) -> Result<Json<ExternalProjectDto>, AppError> {
    let project = project_service::get_project(&state.db, user_id, &project_id).await?;
    Ok(Json(project))
}

/// PUT /api/users/{id}/external-projects/{project_id}
#[utoipa::path(
    put,
    path = "/api/users/{id}/external-projects/{project_id}",
    tag = "external-projects",
    operation_id = "updateExternalProject",
    params(
        ("id" = i64, Path, description = "Owning user ID"),
        ("project_id" = String, Path, description = "Project ID")
    ),
    request_body = UpdateExternalProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ExternalProjectDto),
        (status = 400, description = "Request validation failed", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User or project not found", body = ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath((user_id, project_id)): ApiPath<(i64, String)>,
    ValidatedJson(body): ValidatedJson<UpdateExternalProjectRequest>,
) -> Result<Json<ExternalProjectDto>, AppError> {
    let project = project_service::update_project(&state.db, user_id, &project_id, &body).await?;
    Ok(Json(project))
}

/// DELETE /api/users/{id}/external-projects/{project_id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}/external-projects/{project_id}",
    tag = "external-projects",
    operation_id = "deleteExternalProject",
    params(
        ("id" = i64, Path, description = "Owning user ID"),
        ("project_id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User or project not found", body = ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath((user_id, project_id)): ApiPath<(i64, String)>,
) -> Result<StatusCode, AppError> {
    project_service::delete_project(&state.db, user_id, &project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
