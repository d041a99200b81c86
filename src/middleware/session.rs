//! Cookie session middleware.
//!
//! Reads the `token` cookie, verifies it with the [`SessionCodec`] held in
//! [`AppState`], and attaches a [`SessionContext`] to the request. Handlers
//! behind this middleware take `SessionContext` as an argument.
//!
//! [`SessionCodec`]: crate::services::token::SessionCodec

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{error::AppError, models::merchant::MerchantId, state::AppState};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Merchant identity established from a verified session cookie.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub merchant_id: MerchantId,
    pub email: String,
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Session cookie middleware.
///
/// # Flow
///
/// 1. No `token` cookie (or an empty one): 401
/// 2. Token fails verification (signature, algorithm, claims, expiry): 401
/// 3. Otherwise insert `SessionContext` and call the next handler
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(request.headers());
    let token = jar
        .get(SESSION_COOKIE)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            tracing::debug!("request without session cookie");
            AppError::Unauthorized
        })?;

    let claims = state.sessions.verify(token)?;

    request.extensions_mut().insert(SessionContext {
        merchant_id: claims.merchant_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Cookie set on login. Lives as long as the token inside it.
pub fn session_cookie(token: String, state: &AppState) -> Cookie<'static> {
    let max_age = time::Duration::seconds(state.sessions.ttl().num_seconds());
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .path("/")
        .max_age(max_age)
        .build()
}

/// Empty cookie with `Max-Age=0`, set on logout.
pub fn cleared_session_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}
