//! PostgreSQL implementation of [`Store`].

use async_trait::async_trait;
use uuid::Uuid;

use super::Store;
use crate::{
    db::DbPool,
    error::AppError,
    models::{
        api_key::{ApiKey, NewApiKey},
        event::{Event, NewEvent},
        merchant::{Merchant, MerchantId, NewMerchant},
        sku::{NewSku, Sku},
    },
};

/// Store backed by the shared sqlx pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique-constraint violation to `Conflict`; everything else stays opaque.
fn conflict_on_unique(err: sqlx::Error, message: &str) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        other => AppError::Database(other),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_merchant(&self, merchant: NewMerchant) -> Result<Merchant, AppError> {
        sqlx::query_as::<_, Merchant>(
            r#"
            INSERT INTO merchants (email, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, password_hash, created_at
            "#,
        )
        .bind(&merchant.email)
        .bind(&merchant.name)
        .bind(&merchant.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| conflict_on_unique(err, "email already registered"))
    }

    async fn find_merchant_by_email(&self, email: &str) -> Result<Option<Merchant>, AppError> {
        let merchant = sqlx::query_as::<_, Merchant>(
            "SELECT id, email, name, password_hash, created_at FROM merchants WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(merchant)
    }

    async fn create_api_key(
        &self,
        merchant_id: MerchantId,
        key: NewApiKey,
    ) -> Result<ApiKey, AppError> {
        sqlx::query_as::<_, ApiKey>(
            r#"
            INSERT INTO api_keys (merchant_id, name, key_prefix, key_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, merchant_id, name, key_prefix, key_hash, revoked_at, created_at
            "#,
        )
        .bind(merchant_id)
        .bind(&key.name)
        .bind(&key.key_prefix)
        .bind(&key.key_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| conflict_on_unique(err, "API key already exists"))
    }

    async fn list_api_keys(&self, merchant_id: MerchantId) -> Result<Vec<ApiKey>, AppError> {
        let keys = sqlx::query_as::<_, ApiKey>(
            r#"
            SELECT id, merchant_id, name, key_prefix, key_hash, revoked_at, created_at
            FROM api_keys
            WHERE merchant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(merchant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }

    async fn find_api_key_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, AppError> {
        let key = sqlx::query_as::<_, ApiKey>(
            r#"
            SELECT id, merchant_id, name, key_prefix, key_hash, revoked_at, created_at
            FROM api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(key)
    }

    async fn revoke_api_key(
        &self,
        merchant_id: MerchantId,
        key_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE api_keys
            SET revoked_at = COALESCE(revoked_at, NOW())
            WHERE id = $1 AND merchant_id = $2
            "#,
        )
        .bind(key_id)
        .bind(merchant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_sku(&self, merchant_id: MerchantId, sku: NewSku) -> Result<Sku, AppError> {
        let sku = sqlx::query_as::<_, Sku>(
            r#"
            INSERT INTO skus (merchant_id, name, unit, price_per_unit)
            VALUES ($1, $2, $3, $4)
            RETURNING id, merchant_id, name, unit, price_per_unit, revoked_at, created_at
            "#,
        )
        .bind(merchant_id)
        .bind(&sku.name)
        .bind(&sku.unit)
        .bind(sku.price_per_unit)
        .fetch_one(&self.pool)
        .await?;

        Ok(sku)
    }

    async fn list_skus(&self, merchant_id: MerchantId) -> Result<Vec<Sku>, AppError> {
        let skus = sqlx::query_as::<_, Sku>(
            r#"
            SELECT id, merchant_id, name, unit, price_per_unit, revoked_at, created_at
            FROM skus
            WHERE merchant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(merchant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(skus)
    }

    async fn revoke_sku(&self, merchant_id: MerchantId, sku_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE skus
            SET revoked_at = COALESCE(revoked_at, NOW())
            WHERE id = $1 AND merchant_id = $2
            "#,
        )
        .bind(sku_id)
        .bind(merchant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_event(
        &self,
        merchant_id: MerchantId,
        event: NewEvent,
    ) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (merchant_id, customer_id, sku_id, amount, sent_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, merchant_id, customer_id, sku_id, amount, sent_at, created_at
            "#,
        )
        .bind(merchant_id)
        .bind(event.customer_id)
        .bind(event.sku_id)
        .bind(event.amount)
        .bind(event.sent_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn list_events(&self, merchant_id: MerchantId) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, merchant_id, customer_id, sku_id, amount, sent_at, created_at
            FROM events
            WHERE merchant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(merchant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
