//! In-process implementation of [`Store`].
//!
//! Mirrors the PostgreSQL contract (uniqueness, ownership predicates,
//! newest-first ordering) so router-level tests run without a database.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::{
    error::AppError,
    models::{
        api_key::{ApiKey, NewApiKey},
        event::{Event, NewEvent},
        merchant::{Merchant, MerchantId, NewMerchant},
        sku::{NewSku, Sku},
    },
};

#[derive(Default)]
struct Tables {
    merchants: Vec<Merchant>,
    api_keys: Vec<ApiKey>,
    skus: Vec<Sku>,
    events: Vec<Event>,
}

/// Store kept in memory behind a single lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_merchant(&self, merchant: NewMerchant) -> Result<Merchant, AppError> {
        let mut tables = self.tables.write().await;
        if tables.merchants.iter().any(|m| m.email == merchant.email) {
            return Err(AppError::Conflict("email already registered".to_string()));
        }

        let row = Merchant {
            id: MerchantId(Uuid::new_v4()),
            email: merchant.email,
            name: merchant.name,
            password_hash: merchant.password_hash,
            created_at: Utc::now(),
        };
        tables.merchants.push(row.clone());
        Ok(row)
    }

    async fn find_merchant_by_email(&self, email: &str) -> Result<Option<Merchant>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.merchants.iter().find(|m| m.email == email).cloned())
    }

    async fn create_api_key(
        &self,
        merchant_id: MerchantId,
        key: NewApiKey,
    ) -> Result<ApiKey, AppError> {
        let mut tables = self.tables.write().await;
        if tables.api_keys.iter().any(|k| k.key_hash == key.key_hash) {
            return Err(AppError::Conflict("API key already exists".to_string()));
        }

        let row = ApiKey {
            id: Uuid::new_v4(),
            merchant_id,
            name: key.name,
            key_prefix: key.key_prefix,
            key_hash: key.key_hash,
            revoked_at: None,
            created_at: Utc::now(),
        };
        tables.api_keys.push(row.clone());
        Ok(row)
    }

    async fn list_api_keys(&self, merchant_id: MerchantId) -> Result<Vec<ApiKey>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .api_keys
            .iter()
            .rev()
            .filter(|k| k.merchant_id == merchant_id)
            .cloned()
            .collect())
    }

    async fn find_api_key_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .api_keys
            .iter()
            .find(|k| k.key_hash == key_hash)
            .cloned())
    }

    async fn revoke_api_key(
        &self,
        merchant_id: MerchantId,
        key_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables
            .api_keys
            .iter_mut()
            .find(|k| k.id == key_id && k.merchant_id == merchant_id)
        {
            Some(key) => {
                key.revoked_at.get_or_insert_with(Utc::now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_sku(&self, merchant_id: MerchantId, sku: NewSku) -> Result<Sku, AppError> {
        let row = Sku {
            id: Uuid::new_v4(),
            merchant_id,
            name: sku.name,
            unit: sku.unit,
            price_per_unit: sku.price_per_unit,
            revoked_at: None,
            created_at: Utc::now(),
        };
        self.tables.write().await.skus.push(row.clone());
        Ok(row)
    }

    async fn list_skus(&self, merchant_id: MerchantId) -> Result<Vec<Sku>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .skus
            .iter()
            .rev()
            .filter(|s| s.merchant_id == merchant_id)
            .cloned()
            .collect())
    }

    async fn revoke_sku(&self, merchant_id: MerchantId, sku_id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables
            .skus
            .iter_mut()
            .find(|s| s.id == sku_id && s.merchant_id == merchant_id)
        {
            Some(sku) => {
                sku.revoked_at.get_or_insert_with(Utc::now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_event(
        &self,
        merchant_id: MerchantId,
        event: NewEvent,
    ) -> Result<Event, AppError> {
        let row = Event {
            id: Uuid::new_v4(),
            merchant_id,
            customer_id: event.customer_id,
            sku_id: event.sku_id,
            amount: event.amount,
            sent_at: event.sent_at,
            created_at: Utc::now(),
        };
        self.tables.write().await.events.push(row.clone());
        Ok(row)
    }

    async fn list_events(&self, merchant_id: MerchantId) -> Result<Vec<Event>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .iter()
            .rev()
            .filter(|e| e.merchant_id == merchant_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
