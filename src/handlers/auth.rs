//! Merchant authentication HTTP handlers.
//!
//! - POST /api/v1/auth/signup - Register a merchant
//! - POST /api/v1/auth/login - Exchange email and password for a session cookie
//! - POST /api/v1/auth/logout - Clear the session cookie
//! - GET /api/v1/auth/me - Identity behind the current session

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;

use super::JsonBody;
use crate::{
    error::AppError,
    middleware::session::{SessionContext, cleared_session_cookie, session_cookie},
    models::merchant::{LoginRequest, SessionResponse, SignupRequest, SignupResponse},
    services::auth,
    state::AppState,
};

/// Register a merchant.
///
/// # Endpoint
///
/// `POST /api/v1/auth/signup`
///
/// # Request Body
///
/// ```json
/// { "email": "owner@shop.com", "password": "...", "name": "Shop" }
/// ```
///
/// # Response
///
/// - **201 Created**: `{ "id", "email", "name" }`
/// - **400**: a field is missing or blank
/// - **409**: email already registered
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let merchant = auth::signup(state.store.as_ref(), &state.passwords, request).await?;
    Ok((StatusCode::CREATED, Json(merchant.into())))
}

/// Log in and receive the session cookie.
///
/// # Endpoint
///
/// `POST /api/v1/auth/login`
///
/// # Response
///
/// - **200 OK**: `{ "merchant_id", "email" }` and a `Set-Cookie: token=...`
///   header (`HttpOnly`, `SameSite=Lax`, `Path=/`, 24h `Max-Age`)
/// - **400**: email or password missing
/// - **401**: unknown email or wrong password (indistinguishable)
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let issued = auth::login(
        state.store.as_ref(),
        &state.passwords,
        &state.sessions,
        request,
    )
    .await?;

    let body = SessionResponse {
        merchant_id: issued.claims.merchant_id,
        email: issued.claims.email,
    };
    let jar = jar.add(session_cookie(issued.token, &state));

    Ok((jar, Json(body)))
}

/// Clear the session cookie. Sessions are stateless, so nothing else changes.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (StatusCode, CookieJar) {
    (StatusCode::NO_CONTENT, jar.add(cleared_session_cookie(&state)))
}

/// `GET /api/v1/auth/me`
pub async fn me(session: SessionContext) -> Json<SessionResponse> {
    Json(SessionResponse {
        merchant_id: session.merchant_id,
        email: session.email,
    })
}
