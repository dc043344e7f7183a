//! Unified error handling with a consistent JSON error body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Challenge sent with every 401 so clients know to retry with Basic credentials.
pub const BASIC_CHALLENGE: &str = r#"Basic realm="api""#;

/// Error body returned by every failing API call.
///
/// `path` is left empty here and filled in by
/// [`crate::middleware::request_path::attach_request_path`], which has access
/// to the request URI.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound(format!("User not found with id: {id}"))
    }

    pub fn user_already_exists(email: &str, reason: &str) -> Self {
        Self::Conflict(format!("User with email '{email}' already exists. {reason}"))
    }

    pub fn project_not_found(project_id: &str, user_id: i64) -> Self {
        Self::NotFound(format!(
            "External project with id '{project_id}' not found for user with id: {user_id}"
        ))
    }

    pub fn project_already_exists(project_id: &str, user_id: i64) -> Self {
        Self::Conflict(format!(
            "External project with id '{project_id}' already exists for user with id: {user_id}"
        ))
    }

    /// A single malformed-request error that is not tied to a validated field.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::Validation {
            message: "Malformed request".to_string(),
            details: vec![detail.into()],
        }
    }

    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error represents an auth failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the response body, logging server-side failures.
    pub fn to_error_response(&self) -> ErrorResponse {
        let status = self.status();
        let reason = status.canonical_reason().unwrap_or("Error").to_string();

        let (error, message, details) = match self {
            AppError::NotFound(msg) | AppError::Conflict(msg) => (reason, msg.clone(), None),
            AppError::Validation { message, details } => (
                "Validation Failed".to_string(),
                message.clone(),
                Some(details.clone()),
            ),
            AppError::Unauthorized => (reason, "Authentication required".to_string(), None),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (reason, "An internal error occurred".to_string(), None)
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (reason, "An internal error occurred".to_string(), None)
            }
        };

        ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error,
            message,
            path: String::new(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = self.to_error_response();
        let mut response = (self.status(), Json(body.clone())).into_response();
        if self.is_unauthorized() {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_CHALLENGE),
            );
        }
        response.extensions_mut().insert(body);
        response
    }
}

/// Map a sqlx unique violation to a domain conflict, passing other errors through.
pub fn on_unique_violation(err: sqlx::Error, conflict: impl FnOnce() -> AppError) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => conflict(),
        other => AppError::Database(other),
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages() {
        let err = AppError::user_not_found(1);
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "User not found with id: 1");

        let err = AppError::project_not_found("project-123", 1);
        assert_eq!(
            err.to_string(),
            "External project with id 'project-123' not found for user with id: 1"
        );
    }

    #[test]
    fn conflict_messages() {
        let err = AppError::user_already_exists("test@example.com", "Please use a different email");
        assert_eq!(
            err.to_string(),
            "User with email 'test@example.com' already exists. Please use a different email"
        );
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = AppError::project_already_exists("project-123", 7);
        assert_eq!(
            err.to_string(),
            "External project with id 'project-123' already exists for user with id: 7"
        );
    }

    #[test]
    fn not_found_body() {
        let body = AppError::user_not_found(1).to_error_response();
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.message, "User not found with id: 1");
        assert!(body.details.is_none());
    }

    #[test]
    fn validation_body_carries_details() {
        let err = AppError::Validation {
            message: "Request validation failed".to_string(),
            details: vec!["Email is required".to_string(), "Password is required".to_string()],
        };
        let body = err.to_error_response();
        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Validation Failed");
        assert_eq!(body.message, "Request validation failed");
        assert_eq!(body.details.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn internal_errors_hide_detail() {
        let body = AppError::Internal("disk on fire".to_string()).to_error_response();
        assert_eq!(body.status, 500);
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, "An internal error occurred");
    }

    #[test]
    fn unauthorized_response_has_challenge() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            BASIC_CHALLENGE
        );
        assert!(response.extensions().get::<ErrorResponse>().is_some());
    }

    #[test]
    fn error_body_omits_absent_details() {
        let json = serde_json::to_value(AppError::Conflict("dup".to_string()).to_error_response())
            .unwrap();
        assert_eq!(json["status"], 409);
        assert_eq!(json["error"], "Conflict");
        assert!(json.get("details").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn app_error_from_sqlx() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_unique_errors_pass_through() {
        let err = on_unique_violation(sqlx::Error::RowNotFound, || {
            AppError::Conflict("never".to_string())
        });
        assert!(matches!(err, AppError::Database(_)));
    }
}
