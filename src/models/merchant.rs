//! Merchant (tenant) model and the auth request/response bodies.
//!
//! A merchant is the unit of data isolation: every API key, SKU and event
//! row carries the `MerchantId` of its owner.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Identity of an authenticated merchant.
///
/// Handlers only obtain one from a verified credential (see `middleware`),
/// and every tenant-scoped storage operation requires one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct MerchantId(pub Uuid);

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Represents a merchant record from the database.
///
/// # Database Table
///
/// Maps to the `merchants` table. `email` is unique.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Merchant {
    pub id: MerchantId,

    pub email: String,

    pub name: String,

    /// Argon2 PHC string (algorithm, parameters, salt and digest).
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

/// Values needed to insert a merchant.
#[derive(Debug, Clone)]
pub struct NewMerchant {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Request body for `POST /api/v1/auth/signup`.
///
/// ```json
/// { "email": "a@x.com", "password": "p", "name": "A" }
/// ```
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub name: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.is_empty() || self.name.trim().is_empty()
        {
            return Err(AppError::InvalidRequest(
                "email, password, and name are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Response body for signup. Never includes the password or its hash.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: MerchantId,
    pub email: String,
    pub name: String,
}

impl From<Merchant> for SignupResponse {
    fn from(merchant: Merchant) -> Self {
        Self {
            id: merchant.id,
            email: merchant.email,
            name: merchant.name,
        }
    }
}

/// Request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::InvalidRequest(
                "email and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body returned by login and `GET /api/v1/auth/me`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub merchant_id: MerchantId,
    pub email: String,
}
