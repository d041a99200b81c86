//! Storage layer for merchants, API keys, SKUs and events.
//!
//! Handlers and middleware talk to storage only through the [`Store`] trait.
//! Every operation on API keys, SKUs and events takes the owning
//! [`MerchantId`] and filters on it inside the statement itself, so there is
//! no way to list or modify another tenant's rows through this interface.
//!
//! [`PgStore`] is the production implementation; [`MemoryStore`] keeps the
//! same contract in process memory for tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        api_key::{ApiKey, NewApiKey},
        event::{Event, NewEvent},
        merchant::{Merchant, MerchantId, NewMerchant},
        sku::{NewSku, Sku},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage operations required by the auth core and the tenant handlers.
///
/// Each method is a single atomic statement; nothing here spans a transaction.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Inserts a merchant.
    ///
    /// # Errors
    ///
    /// `AppError::Conflict` when the email is already registered.
    async fn create_merchant(&self, merchant: NewMerchant) -> Result<Merchant, AppError>;

    async fn find_merchant_by_email(&self, email: &str) -> Result<Option<Merchant>, AppError>;

    async fn create_api_key(
        &self,
        merchant_id: MerchantId,
        key: NewApiKey,
    ) -> Result<ApiKey, AppError>;

    /// Keys owned by `merchant_id`, newest first, revoked ones included.
    async fn list_api_keys(&self, merchant_id: MerchantId) -> Result<Vec<ApiKey>, AppError>;

    /// Looks up a key by hash regardless of revocation state.
    ///
    /// Callers decide what a revoked match means.
    async fn find_api_key_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, AppError>;

    /// Sets `revoked_at` on a key owned by `merchant_id`.
    ///
    /// Returns `false` when no key with that id belongs to the merchant.
    /// An already revoked key keeps its original timestamp.
    async fn revoke_api_key(&self, merchant_id: MerchantId, key_id: Uuid)
    -> Result<bool, AppError>;

    async fn create_sku(&self, merchant_id: MerchantId, sku: NewSku) -> Result<Sku, AppError>;

    async fn list_skus(&self, merchant_id: MerchantId) -> Result<Vec<Sku>, AppError>;

    async fn revoke_sku(&self, merchant_id: MerchantId, sku_id: Uuid) -> Result<bool, AppError>;

    async fn insert_event(&self, merchant_id: MerchantId, event: NewEvent)
    -> Result<Event, AppError>;

    async fn list_events(&self, merchant_id: MerchantId) -> Result<Vec<Event>, AppError>;

    /// Connectivity check used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
