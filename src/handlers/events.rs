//! Usage event HTTP handlers.
//!
//! Events are written by merchant backends with an API key and read back by
//! the dashboard with a session cookie. Both paths take the merchant from the
//! verified credential; a `merchant_id` in the body is ignored.

use axum::{Json, extract::State, http::StatusCode};

use super::JsonBody;
use crate::{
    error::AppError,
    middleware::{api_key::ApiKeyContext, session::SessionContext},
    models::event::{CreateEventRequest, EventResponse},
    state::AppState,
};

/// Record a usage event.
///
/// # Endpoint
///
/// `POST /api/v1/events` with `Authorization: Bearer <api key>`
///
/// # Request Body
///
/// ```json
/// {
///   "customer_id": "7f1c1e6a-2d1b-4b8e-9a55-1f4f0c7b2a10",
///   "sku_id": "0b8f5a0e-9b7c-4a1e-8d4e-2c6f1a3b5d70",
///   "amount": 3,
///   "sent_at": "2025-01-01T12:00:00Z"
/// }
/// ```
pub async fn create_event(
    State(state): State<AppState>,
    auth: ApiKeyContext,
    JsonBody(request): JsonBody<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let new_event = request.validate()?;
    let event = state.store.insert_event(auth.merchant_id, new_event).await?;

    tracing::debug!(
        merchant_id = %auth.merchant_id,
        api_key_id = %auth.api_key_id,
        event_id = %event.id,
        "event recorded"
    );
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// `GET /api/v1/events`, newest first.
pub async fn list_events(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = state.store.list_events(session.merchant_id).await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}
