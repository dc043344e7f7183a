//! User account routes under `/api/users`.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::{AppError, ErrorResponse};
use crate::middleware::extract::{ApiPath, ValidatedJson};
use crate::models::user::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::services::user as user_service;
use crate::AppState;

/// POST /api/users: register a user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    operation_id = "createUser",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Request validation failed", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), AppError> {
    let user = user_service::create_user(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/{id}: fetch a user with its projects.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    operation_id = "getUserById",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<UserDto>, AppError> {
    let user = user_service::get_user(&state.db, id).await?;
    Ok(Json(user))
}

/// PUT /api/users/{id}: partial update.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    operation_id = "updateUser",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Request validation failed", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserDto>, AppError> {
    let user = user_service::update_user(&state.db, id, &body).await?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}: remove a user and its projects.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    operation_id = "deleteUser",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    user_service::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
