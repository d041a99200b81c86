//! SKU management HTTP handlers.
//!
//! - POST /api/v1/skus - Create a SKU
//! - GET /api/v1/skus - List the merchant's SKUs
//! - DELETE /api/v1/skus/{id} - Revoke a SKU

use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;

use super::{JsonBody, PathParam};
use crate::{
    error::AppError,
    middleware::session::SessionContext,
    models::sku::{CreateSkuRequest, SkuResponse},
    state::AppState,
};

/// Create a SKU.
///
/// # Request Body
///
/// ```json
/// { "name": "API call", "unit": "request", "price_per_unit": 0.002 }
/// ```
///
/// `unit` is optional. `price_per_unit` must be greater than zero.
pub async fn create_sku(
    State(state): State<AppState>,
    session: SessionContext,
    JsonBody(request): JsonBody<CreateSkuRequest>,
) -> Result<(StatusCode, Json<SkuResponse>), AppError> {
    let new_sku = request.validate()?;
    let sku = state.store.create_sku(session.merchant_id, new_sku).await?;

    tracing::info!(merchant_id = %session.merchant_id, sku_id = %sku.id, "SKU created");
    Ok((StatusCode::CREATED, Json(sku.into())))
}

pub async fn list_skus(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<Vec<SkuResponse>>, AppError> {
    let skus = state.store.list_skus(session.merchant_id).await?;
    Ok(Json(skus.into_iter().map(SkuResponse::from).collect()))
}

/// Revoke a SKU. Same 204 contract as API key revocation.
pub async fn revoke_sku(
    State(state): State<AppState>,
    session: SessionContext,
    PathParam(sku_id): PathParam<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.revoke_sku(session.merchant_id, sku_id).await? {
        tracing::info!(merchant_id = %session.merchant_id, sku_id = %sku_id, "SKU revoked");
    } else {
        tracing::debug!(merchant_id = %session.merchant_id, sku_id = %sku_id, "no SKU to revoke");
    }
    Ok(StatusCode::NO_CONTENT)
}
