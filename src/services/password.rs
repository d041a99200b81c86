//! Password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings, so the cost parameters travel with each
//! hash and raising the configured cost does not invalidate existing accounts.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Argon2id hasher with a configured cost.
///
/// Cloning is cheap; clones are moved onto the blocking pool for each hash.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    /// Hash of a throwaway password, verified against when an email is unknown
    /// so a failed login costs the same either way.
    dummy_hash: String,
}

impl Argon2Hasher {
    /// Builds a hasher from memory cost (KiB), iteration count and parallelism.
    ///
    /// # Errors
    ///
    /// `AppError::Internal` if the parameters are out of range for Argon2.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::Internal(format!("invalid argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            dummy_hash: String::new(),
        };
        hasher.dummy_hash = hasher.hash("correct horse battery staple")?;
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Salts and hashes a password, returning the PHC string.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
    }

    /// Checks a password against a stored PHC string.
    ///
    /// A stored value that does not parse counts as a mismatch.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                return false;
            }
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Burns one verification against the dummy hash. Always returns `false`.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }

    /// [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))?
    }

    /// Verifies on the blocking thread pool. `None` for `stored_hash` runs the dummy check.
    pub async fn verify_blocking(
        &self,
        password: String,
        stored_hash: Option<String>,
    ) -> Result<bool, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || match stored_hash {
            Some(stored) => hasher.verify(&password, &stored),
            None => hasher.verify_dummy(&password),
        })
        .await
        .map_err(|e| AppError::Internal(format!("password verification task failed: {e}")))
    }
}

#[cfg(test)]
pub(crate) fn test_hasher() -> Argon2Hasher {
    // Minimum cost; production values come from configuration.
    Argon2Hasher::new(8, 1, 1).unwrap()
}
