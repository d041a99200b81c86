//! Usage event models.
//!
//! Events are submitted by merchants' backends with an API key and read back
//! on the dashboard. The owning merchant always comes from the credential,
//! never from the request body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, models::merchant::MerchantId};

/// Represents an event record from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub merchant_id: MerchantId,
    pub customer_id: Uuid,
    pub sku_id: Uuid,
    pub amount: f64,
    /// Client-side timestamp of the usage.
    pub sent_at: DateTime<Utc>,
    /// Server-side insertion time.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub customer_id: Uuid,
    pub sku_id: Uuid,
    pub amount: f64,
    pub sent_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/events`.
///
/// ```json
/// {
///   "customer_id": "550e8400-e29b-41d4-a716-446655440000",
///   "sku_id": "660e8400-e29b-41d4-a716-446655440001",
///   "amount": 3,
///   "sent_at": "2025-12-20T10:00:00Z"
/// }
/// ```
///
/// Any `merchant_id` in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub customer_id: Option<Uuid>,
    pub sku_id: Option<Uuid>,
    pub amount: Option<f64>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl CreateEventRequest {
    pub fn validate(self) -> Result<NewEvent, AppError> {
        let customer_id = self
            .customer_id
            .ok_or_else(|| AppError::InvalidRequest("customer_id is required".to_string()))?;
        let sku_id = self
            .sku_id
            .ok_or_else(|| AppError::InvalidRequest("sku_id is required".to_string()))?;
        let sent_at = self
            .sent_at
            .ok_or_else(|| AppError::InvalidRequest("sent_at is required".to_string()))?;

        let amount = match self.amount {
            Some(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => {
                return Err(AppError::InvalidRequest(
                    "amount must be greater than 0".to_string(),
                ));
            }
        };

        Ok(NewEvent {
            customer_id,
            sku_id,
            amount,
            sent_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub sku_id: Uuid,
    pub amount: f64,
    pub sent_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            customer_id: event.customer_id,
            sku_id: event.sku_id,
            amount: event.amount,
            sent_at: event.sent_at,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CreateEventRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_complete_event() {
        let event = parse(json!({
            "customer_id": Uuid::new_v4(),
            "sku_id": Uuid::new_v4(),
            "amount": 2.5,
            "sent_at": "2025-12-20T10:00:00Z"
        }))
        .validate()
        .unwrap();

        assert_eq!(event.amount, 2.5);
    }

    #[test]
    fn rejects_missing_fields_and_non_positive_amount() {
        let missing_sku = parse(json!({
            "customer_id": Uuid::new_v4(),
            "amount": 1,
            "sent_at": "2025-12-20T10:00:00Z"
        }));
        assert!(missing_sku.validate().is_err());

        let zero_amount = parse(json!({
            "customer_id": Uuid::new_v4(),
            "sku_id": Uuid::new_v4(),
            "amount": 0,
            "sent_at": "2025-12-20T10:00:00Z"
        }));
        assert!(zero_amount.validate().is_err());

        let missing_time = parse(json!({
            "customer_id": Uuid::new_v4(),
            "sku_id": Uuid::new_v4(),
            "amount": 1
        }));
        assert!(missing_time.validate().is_err());
    }
}
