//! HTTP Basic authentication extractor and the middleware guarding `/api`.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

use crate::errors::AppError;
use crate::services::auth::{self as auth_service, ROLE_USER};
use crate::AppState;

/// Authenticated user resolved from `Authorization: Basic` credentials.
///
/// Use as an Axum extractor in handlers that need the caller:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by `require_auth` for this request.
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let Authorization(credentials) = parts
            .headers
            .typed_get::<Authorization<Basic>>()
            .ok_or(AppError::Unauthorized)?;

        let user =
            auth_service::authenticate(&state.db, credentials.username(), credentials.password())
                .await?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
        })
    }
}

/// Reject unauthenticated requests before they reach a handler.
pub async fn require_auth(current_user: CurrentUser, mut request: Request, next: Next) -> Response {
    tracing::debug!(
        user_id = current_user.id,
        email = %current_user.email,
        authority = ROLE_USER,
        "Authenticated request"
    );
    request.extensions_mut().insert(current_user);
    next.run(request).await
}
