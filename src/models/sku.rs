//! SKU (billable product) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, models::merchant::MerchantId};

/// Represents a SKU record from the database.
///
/// Maps to the `skus` table. Revoked SKUs keep their row; `revoked_at` marks them.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Sku {
    pub id: Uuid,
    pub merchant_id: MerchantId,
    pub name: String,
    pub unit: Option<String>,
    pub price_per_unit: f64,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSku {
    pub name: String,
    pub unit: Option<String>,
    pub price_per_unit: f64,
}

/// Request body for `POST /api/v1/skus`.
///
/// ```json
/// { "name": "API call", "unit": "request", "price_per_unit": 0.002 }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateSkuRequest {
    #[serde(default)]
    pub name: String,

    pub unit: Option<String>,

    pub price_per_unit: Option<f64>,
}

impl CreateSkuRequest {
    pub fn validate(self) -> Result<NewSku, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidRequest("name is required".to_string()));
        }

        let price_per_unit = match self.price_per_unit {
            Some(price) if price.is_finite() && price > 0.0 => price,
            _ => {
                return Err(AppError::InvalidRequest(
                    "price_per_unit must be greater than 0".to_string(),
                ));
            }
        };

        // An empty unit is the same as no unit.
        let unit = self
            .unit
            .map(|unit| unit.trim().to_string())
            .filter(|unit| !unit.is_empty());

        Ok(NewSku {
            name: name.to_string(),
            unit,
            price_per_unit,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SkuResponse {
    pub id: Uuid,
    pub name: String,
    pub unit: Option<String>,
    pub price_per_unit: f64,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Sku> for SkuResponse {
    fn from(sku: Sku) -> Self {
        Self {
            id: sku.id,
            name: sku.name,
            unit: sku.unit,
            price_per_unit: sku.price_per_unit,
            revoked_at: sku.revoked_at,
            created_at: sku.created_at,
        }
    }
}
