//! `GET /health`: liveness plus a storage round trip.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,

    /// `"connected"` once [`Store::ping`](crate::store::Store::ping) succeeded
    pub database: String,

    pub timestamp: DateTime<Utc>,
}

/// Pings the configured store and reports healthy if it answers.
///
/// Sits outside `/api/v1` and behind no guard, so load balancers can call it
/// without credentials. A failed ping surfaces as the usual 500
/// `internal_error` body; the driver error itself only reaches the logs.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.store.ping().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        database: "connected".to_string(),
        timestamp: Utc::now(),
    }))
}
