//! Extractors that turn malformed or invalid input into [`AppError`] responses.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;
use crate::models::validation::collect_messages;

/// `Json` with rejections rendered as the API error body.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `Path` with rejections rendered as the API error body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// JSON body that has passed its `validator` rules.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;
        value.validate().map_err(|errors| AppError::Validation {
            message: "Request validation failed".to_string(),
            details: collect_messages(&errors),
        })?;
        Ok(Self(value))
    }
}
