//! Merchant signup and password login.

use crate::{
    error::AppError,
    models::merchant::{LoginRequest, Merchant, NewMerchant, SignupRequest},
    services::{
        password::Argon2Hasher,
        token::{IssuedToken, SessionCodec},
    },
    store::Store,
};

/// Emails are compared case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registers a merchant.
///
/// # Errors
///
/// - `InvalidRequest`: a field is blank
/// - `Conflict`: the email is already registered
/// - `Internal` / `Database`: hashing or storage failed
pub async fn signup(
    store: &dyn Store,
    hasher: &Argon2Hasher,
    request: SignupRequest,
) -> Result<Merchant, AppError> {
    request.validate()?;

    let email = normalize_email(&request.email);
    let password_hash = hasher.hash_blocking(request.password).await?;

    let merchant = store
        .create_merchant(NewMerchant {
            email,
            name: request.name.trim().to_string(),
            password_hash,
        })
        .await?;

    tracing::info!(merchant_id = %merchant.id, "merchant signed up");
    Ok(merchant)
}

/// Checks email and password and issues a session token.
///
/// An unknown email and a wrong password produce the same `Unauthorized`,
/// and both cost one Argon2 verification.
pub async fn login(
    store: &dyn Store,
    hasher: &Argon2Hasher,
    sessions: &SessionCodec,
    request: LoginRequest,
) -> Result<IssuedToken, AppError> {
    request.validate()?;

    let email = normalize_email(&request.email);
    let merchant = store.find_merchant_by_email(&email).await?;

    let stored_hash = merchant.as_ref().map(|m| m.password_hash.clone());
    let verified = hasher.verify_blocking(request.password, stored_hash).await?;

    let merchant = match merchant {
        Some(merchant) if verified => merchant,
        Some(merchant) => {
            tracing::info!(merchant_id = %merchant.id, "login failed: wrong password");
            return Err(AppError::Unauthorized);
        }
        None => {
            tracing::info!("login failed: unknown email");
            return Err(AppError::Unauthorized);
        }
    };

    let issued = sessions.issue(merchant.id, &merchant.email)?;
    tracing::info!(merchant_id = %merchant.id, "merchant logged in");
    Ok(issued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SessionSecret, services::password::test_hasher, store::MemoryStore};

    fn signup_request(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: "Shop".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  A@X.com "), "a@x.com");
    }

    #[tokio::test]
    async fn signup_stores_a_hash_not_the_password() {
        let store = MemoryStore::new();
        let hasher = test_hasher();

        let merchant = signup(&store, &hasher, signup_request("A@x.com", "pw"))
            .await
            .unwrap();

        assert_eq!(merchant.email, "a@x.com");
        assert_ne!(merchant.password_hash, "pw");
        assert!(hasher.verify("pw", &merchant.password_hash));
    }

    #[tokio::test]
    async fn duplicate_signup_is_a_conflict_regardless_of_case() {
        let store = MemoryStore::new();
        let hasher = test_hasher();
        signup(&store, &hasher, signup_request("a@x.com", "pw"))
            .await
            .unwrap();

        let err = signup(&store, &hasher, signup_request("A@X.COM", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn blank_signup_fields_are_rejected() {
        let store = MemoryStore::new();
        let err = signup(&store, &test_hasher(), signup_request(" ", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn login_issues_token_for_correct_password() {
        let store = MemoryStore::new();
        let hasher = test_hasher();
        let sessions = SessionCodec::new(&SessionSecret::new("secret"));
        let merchant = signup(&store, &hasher, signup_request("a@x.com", "pw"))
            .await
            .unwrap();

        let issued = login(&store, &hasher, &sessions, login_request("a@x.com", "pw"))
            .await
            .unwrap();

        let claims = sessions.verify(&issued.token).unwrap();
        assert_eq!(claims.merchant_id, merchant.id);
        assert_eq!(claims.email, "a@x.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let store = MemoryStore::new();
        let hasher = test_hasher();
        let sessions = SessionCodec::new(&SessionSecret::new("secret"));
        signup(&store, &hasher, signup_request("a@x.com", "pw"))
            .await
            .unwrap();

        let wrong_password = login(&store, &hasher, &sessions, login_request("a@x.com", "nope"))
            .await
            .unwrap_err();
        let unknown_email = login(&store, &hasher, &sessions, login_request("b@x.com", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::Unauthorized));
        assert!(matches!(unknown_email, AppError::Unauthorized));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}
