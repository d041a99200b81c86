//! API key service.
//!
//! Raw keys are `bb_` followed by 32 hex characters (16 random bytes). Only
//! the SHA-256 hex digest and an 11 character display prefix are stored; the
//! raw key is returned once, at creation.

use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        api_key::{ApiKey, CreateApiKeyResponse, NewApiKey},
        merchant::MerchantId,
    },
    store::Store,
};

/// Marker at the start of every raw key.
pub const API_KEY_TAG: &str = "bb_";

/// Length of the stored display prefix: the tag plus 8 hex characters.
pub const API_KEY_PREFIX_LEN: usize = 11;

const API_KEY_RANDOM_BYTES: usize = 16;

/// A newly generated key before it is persisted.
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    pub raw: String,
    pub prefix: String,
}

/// Generates a raw key from the thread-local CSPRNG.
pub fn generate() -> GeneratedKey {
    let mut bytes = [0u8; API_KEY_RANDOM_BYTES];
    rand::rng().fill(&mut bytes);

    let raw = format!("{API_KEY_TAG}{}", hex::encode(bytes));
    let prefix = raw[..API_KEY_PREFIX_LEN].to_string();
    GeneratedKey { raw, prefix }
}

/// SHA-256 hex digest of the full raw key.
pub fn hash(raw_key: &str) -> String {
    hex::encode(Sha256::digest(raw_key.as_bytes()))
}

/// Creates a key for `merchant_id` and returns it with the raw value.
pub async fn create(
    store: &dyn Store,
    merchant_id: MerchantId,
    name: String,
) -> Result<CreateApiKeyResponse, AppError> {
    let generated = generate();
    let key = store
        .create_api_key(
            merchant_id,
            NewApiKey {
                name,
                key_prefix: generated.prefix,
                key_hash: hash(&generated.raw),
            },
        )
        .await?;

    tracing::info!(
        merchant_id = %merchant_id,
        api_key_id = %key.id,
        key_prefix = %key.key_prefix,
        "API key created"
    );

    Ok(CreateApiKeyResponse {
        id: key.id,
        name: key.name,
        key: generated.raw,
        key_prefix: key.key_prefix,
    })
}

/// Resolves a raw key presented by a caller to its active record.
///
/// Unknown and revoked keys are both `Unauthorized`; only the log line differs.
pub async fn authenticate(store: &dyn Store, raw_key: &str) -> Result<ApiKey, AppError> {
    let key = match store.find_api_key_by_hash(&hash(raw_key)).await? {
        Some(key) => key,
        None => {
            tracing::debug!("API key not found");
            return Err(AppError::Unauthorized);
        }
    };

    if key.is_revoked() {
        tracing::warn!(
            api_key_id = %key.id,
            key_prefix = %key.key_prefix,
            "revoked API key presented"
        );
        return Err(AppError::Unauthorized);
    }

    Ok(key)
}

/// Revokes a key if `merchant_id` owns it.
///
/// A key that does not exist or belongs to someone else is indistinguishable
/// from success to the caller.
pub async fn revoke(
    store: &dyn Store,
    merchant_id: MerchantId,
    key_id: Uuid,
) -> Result<(), AppError> {
    if store.revoke_api_key(merchant_id, key_id).await? {
        tracing::info!(merchant_id = %merchant_id, api_key_id = %key_id, "API key revoked");
    } else {
        tracing::debug!(merchant_id = %merchant_id, api_key_id = %key_id, "no API key to revoke");
    }
    Ok(())
}
