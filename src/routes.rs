//! Router construction.
//!
//! Routes are grouped by guard. Each group gets its middleware through
//! `route_layer`, so unmatched paths still fall through to a plain 404 and
//! the public routes never see a credential check.
//!
//! [`app`] is what gets served: the router wrapped so a trailing slash is
//! trimmed before routing (`/api/v1/api-keys/` reaches `/api/v1/api-keys`).

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use tower::{Layer, ServiceBuilder};
use tower_http::{
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{api_keys, auth, events, health, skus},
    middleware::{api_key::api_key_middleware, session::session_middleware},
    state::AppState,
};

/// The service handed to `axum::serve`.
///
/// Path normalization has to wrap the `Router` from outside; inside
/// `Router::layer` it would run after the route was already matched.
pub fn app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Builds the routes: `/health` plus everything under `/api/v1`.
pub fn router(state: AppState) -> Router {
    // No authentication required
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    // Dashboard routes, authenticated by the session cookie
    let session_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route(
            "/api-keys",
            post(api_keys::create_api_key).get(api_keys::list_api_keys),
        )
        .route("/api-keys/{id}", delete(api_keys::revoke_api_key))
        .route("/skus", post(skus::create_sku).get(skus::list_skus))
        .route("/skus/{id}", delete(skus::revoke_sku))
        .route("/events", get(events::list_events))
        .route_layer(from_fn_with_state(state.clone(), session_middleware));

    // Ingestion routes, authenticated by API key. `POST /events` shares its
    // path with the session-guarded `GET /events`; merging keeps each
    // method's own guard.
    let ingest_routes = Router::new()
        .route("/events", post(events::create_event))
        .route_layer(from_fn_with_state(state.clone(), api_key_middleware));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(ingest_routes);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
