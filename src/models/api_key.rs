//! API Key model for machine-to-machine authentication.
//!
//! API keys authenticate event ingestion. They are stored in the database as SHA-256 hashes; the raw key is shown to the merchant once, at creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, models::merchant::MerchantId};

/// Represents an API key record from the database.
///
/// # Database Table
///
/// Maps to the `api_keys` table with columns:
/// - `id`: Unique identifier (UUID)
/// - `merchant_id`: Owning merchant
/// - `name`: Display name chosen by the merchant
/// - `key_prefix`: First 11 characters of the raw key, safe to display
/// - `key_hash`: SHA-256 hash of the raw key (unique)
/// - `revoked_at`: Set once the key is revoked
/// - `created_at`: When the key was created
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    /// Unique identifier for this API key
    pub id: Uuid,

    pub merchant_id: MerchantId,

    pub name: String,

    pub key_prefix: String,

    /// SHA-256 hash of the actual API key (64 hex characters)
    ///
    /// When a request comes in with "Bearer bb_...", we:
    /// 1. Hash the key with SHA-256
    /// 2. Look up this hash in the database
    /// 3. If found and not revoked, authenticate the request
    pub key_hash: String,

    /// Revocation timestamp
    ///
    /// Revoked keys stay in the table for audit but are rejected during authentication.
    pub revoked_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl ApiKey {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// Values needed to insert an API key. Holds the hash, never the raw key.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub name: String,
    pub key_prefix: String,
    pub key_hash: String,
}

/// Request body for `POST /api/v1/api-keys`.
#[derive(Debug, Deserialize)]
pub struct CreateApiKeyRequest {
    #[serde(default)]
    pub name: String,
}

impl CreateApiKeyRequest {
    /// Returns the trimmed display name.
    pub fn validate(self) -> Result<String, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidRequest("name is required".to_string()));
        }
        Ok(name.to_string())
    }
}

/// Response for key creation. The only place the raw key ever appears.
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "name": "k1",
///   "key": "bb_0f1e2d3c4b5a69788796a5b4c3d2e1f0",
///   "key_prefix": "bb_0f1e2d3c"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct CreateApiKeyResponse {
    pub id: Uuid,
    pub name: String,
    pub key: String,
    pub key_prefix: String,
}

/// API key as listed on the dashboard (no raw key, no hash).
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub id: Uuid,
    pub name: String,
    pub key_prefix: String,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ApiKey> for ApiKeyResponse {
    fn from(key: ApiKey) -> Self {
        Self {
            id: key.id,
            name: key.name,
            key_prefix: key.key_prefix,
            revoked_at: key.revoked_at,
            created_at: key.created_at,
        }
    }
}
