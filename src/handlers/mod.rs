//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives the caller's identity from a typed context extractor
//! 2. Validates the request body
//! 3. Calls a service or a single tenant-scoped storage operation
//! 4. Returns JSON and a status code
//!
//! Bodies and path parameters go through [`JsonBody`] and [`PathParam`] so a
//! malformed request is answered with the standard error body.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// API key management endpoints
pub mod api_keys;
/// Signup, login, logout and session introspection
pub mod auth;
/// Usage event ingestion and listing
pub mod events;
/// Liveness endpoint
pub mod health;
/// SKU management endpoints
pub mod skus;

/// `Json<T>` whose rejection is an `AppError::InvalidRequest`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `Path<T>` whose rejection is an `AppError::InvalidRequest`.
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| AppError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}
