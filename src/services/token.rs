//! Session token codec.
//!
//! Session tokens are HS256 JWTs carrying `{merchant_id, email, iat, exp}`.
//! They are stateless: the server keeps no session table, so a token stays
//! valid until `exp` and the signing secret is the only thing that makes it
//! unforgeable.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::SessionSecret, error::AppError, models::merchant::MerchantId};

/// Lifetime of a session token and of the cookie carrying it.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Claims carried by a session token.
///
/// All fields are required; a token missing one fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub merchant_id: MerchantId,
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds); the token is accepted up to and including this second
    pub exp: i64,
}

/// A freshly signed token together with the claims inside it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
}

/// Signs and verifies session tokens with one immutable secret.
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionCodec {
    pub fn new(secret: &SessionSecret) -> Self {
        Self::with_ttl(secret, Duration::hours(SESSION_TTL_HOURS))
    }

    pub fn with_ttl(secret: &SessionSecret, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Only the HMAC family; `none` and asymmetric algorithms fail decoding.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // Expiry is checked in `verify_at` against an explicit clock with zero leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, merchant_id: MerchantId, email: &str) -> Result<IssuedToken, AppError> {
        self.issue_at(merchant_id, email, Utc::now())
    }

    pub fn issue_at(
        &self,
        merchant_id: MerchantId,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let claims = SessionClaims {
            merchant_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign session token: {e}")))?;

        Ok(IssuedToken { token, claims })
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies algorithm, signature, claim shape and expiry.
    ///
    /// Every failure is `AppError::Unauthorized`; the reason is only logged.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, AppError> {
        let claims = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "session token rejected");
                AppError::Unauthorized
            })?
            .claims;

        if now.timestamp() > claims.exp {
            tracing::debug!(merchant_id = %claims.merchant_id, "session token expired");
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use uuid::Uuid;

    use super::*;

    fn codec(secret: &str) -> SessionCodec {
        SessionCodec::new(&SessionSecret::new(secret))
    }

    fn merchant() -> MerchantId {
        MerchantId(Uuid::new_v4())
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let codec = codec("secret-a");
        let id = merchant();
        let issued = codec.issue(id, "a@x.com").unwrap();

        let claims = codec.verify(&issued.token).unwrap();
        assert_eq!(claims, issued.claims);
        assert_eq!(claims.merchant_id, id);
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_HOURS * 3600);
    }

    #[test]
    fn accepted_until_expiry_and_rejected_one_second_after() {
        let codec = codec("secret-a");
        let issued_at = Utc::now();
        let issued = codec.issue_at(merchant(), "a@x.com", issued_at).unwrap();
        let expiry = DateTime::from_timestamp(issued.claims.exp, 0).unwrap();

        assert!(codec.verify_at(&issued.token, expiry).is_ok());
        assert!(matches!(
            codec.verify_at(&issued.token, expiry + Duration::seconds(1)),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn other_secret_is_rejected() {
        let issued = codec("secret-a").issue(merchant(), "a@x.com").unwrap();
        assert!(matches!(
            codec("secret-b").verify(&issued.token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn single_bit_flip_in_payload_is_rejected() {
        let codec = codec("secret-a");
        let issued = codec.issue(merchant(), "a@x.com").unwrap();
        let parts: Vec<&str> = issued.token.split('.').collect();

        let mut payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        // Flip the low bit of the first character after `@` in the email.
        let at = payload.iter().position(|b| *b == b'@').unwrap();
        payload[at + 1] ^= 0x01;
        let tampered = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(&payload),
            parts[2]
        );

        assert!(matches!(
            codec.verify(&tampered),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn none_algorithm_is_rejected() {
        let codec = codec("secret-a");
        let issued = codec.issue(merchant(), "a@x.com").unwrap();
        let payload = issued.token.split('.').nth(1).unwrap();
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);

        let unsigned = format!("{header}.{payload}.");
        assert!(matches!(
            codec.verify(&unsigned),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn asymmetric_algorithm_header_is_rejected() {
        let codec = codec("secret-a");
        let issued = codec.issue(merchant(), "a@x.com").unwrap();
        let parts: Vec<&str> = issued.token.split('.').collect();
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);

        let substituted = format!("{header}.{}.{}", parts[1], parts[2]);
        assert!(matches!(
            codec.verify(&substituted),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn other_hmac_algorithms_are_accepted() {
        let secret = SessionSecret::new("secret-a");
        let codec = SessionCodec::new(&secret);
        let claims = SessionClaims {
            merchant_id: merchant(),
            email: "a@x.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec.verify(&token).unwrap(), claims);
    }

    #[test]
    fn claims_missing_a_field_are_rejected() {
        #[derive(Serialize)]
        struct Partial {
            merchant_id: Uuid,
            exp: i64,
        }

        let secret = SessionSecret::new("secret-a");
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                merchant_id: Uuid::new_v4(),
                exp: Utc::now().timestamp() + 60,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            SessionCodec::new(&secret).verify(&token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let codec = codec("secret-a");
        for token in ["", "abc", "a.b.c", "..."] {
            assert!(codec.verify(token).is_err(), "{token:?} should be rejected");
        }
    }
}
