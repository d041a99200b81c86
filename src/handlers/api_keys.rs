//! API key management HTTP handlers.
//!
//! All three endpoints sit behind the session middleware and act only on
//! keys owned by the logged-in merchant.

use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;

use super::{JsonBody, PathParam};
use crate::{
    error::AppError,
    middleware::session::SessionContext,
    models::api_key::{ApiKeyResponse, CreateApiKeyRequest, CreateApiKeyResponse},
    services::api_key,
    state::AppState,
};

/// Create an API key.
///
/// # Endpoint
///
/// `POST /api/v1/api-keys`
///
/// # Response (201 Created)
///
/// The raw key appears here and nowhere else:
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "name": "production",
///   "key": "bb_0123456789abcdef0123456789abcdef",
///   "key_prefix": "bb_01234567"
/// }
/// ```
pub async fn create_api_key(
    State(state): State<AppState>,
    session: SessionContext,
    JsonBody(request): JsonBody<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<CreateApiKeyResponse>), AppError> {
    let name = request.validate()?;
    let created = api_key::create(state.store.as_ref(), session.merchant_id, name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List the merchant's keys, newest first. Neither raw keys nor hashes are returned.
pub async fn list_api_keys(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<Vec<ApiKeyResponse>>, AppError> {
    let keys = state.store.list_api_keys(session.merchant_id).await?;
    Ok(Json(keys.into_iter().map(ApiKeyResponse::from).collect()))
}

/// Revoke a key.
///
/// # Endpoint
///
/// `DELETE /api/v1/api-keys/{id}`
///
/// Answers 204 whether or not the merchant owns a key with that id, so the
/// response does not reveal which ids exist.
pub async fn revoke_api_key(
    State(state): State<AppState>,
    session: SessionContext,
    PathParam(key_id): PathParam<Uuid>,
) -> Result<StatusCode, AppError> {
    api_key::revoke(state.store.as_ref(), session.merchant_id, key_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
