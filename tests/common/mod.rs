//! Shared harness for HTTP-level tests.
//!
//! Builds the production router over an in-memory store and drives it with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        HeaderMap, Method, Request, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
};
use billbo_backend::{
    config::SessionSecret,
    routes,
    services::{password::Argon2Hasher, token::SessionCodec},
    state::AppState,
    store::MemoryStore,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

pub const PASSWORD: &str = "correct-password";

/// Credential attached to a test request.
pub enum Credential<'a> {
    None,
    /// A `token=...` cookie pair as returned by [`session_cookie`].
    Session(&'a str),
    /// A raw API key sent as a bearer token.
    ApiKey(&'a str),
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when the body is empty.
    pub body: Value,
}

pub struct TestApp {
    router: NormalizePath<Router>,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            SessionCodec::new(&SessionSecret::new("integration-test-secret")),
            // Minimum Argon2 cost keeps the suite fast.
            Argon2Hasher::new(8, 1, 1).expect("argon2 params"),
            false,
        );
        Self {
            router: routes::app(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        credential: Credential<'_>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        builder = match credential {
            Credential::None => builder,
            Credential::Session(cookie) => builder.header(COOKIE, cookie),
            Credential::ApiKey(key) => builder.header(AUTHORIZATION, format!("Bearer {key}")),
        };

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request build");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request execution");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body extraction");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json deserialization")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn signup(&self, email: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/v1/auth/signup",
            Credential::None,
            Some(json!({ "email": email, "password": PASSWORD, "name": "Test Shop" })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/v1/auth/login",
            Credential::None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Registers a merchant, logs in, and returns the `token=...` cookie pair.
    pub async fn merchant_session(&self, email: &str) -> String {
        assert_eq!(self.signup(email).await.status, StatusCode::CREATED);
        let login = self.login(email, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK);
        session_cookie(&login.headers).expect("session cookie")
    }

    /// Creates an API key for the session and returns `(id, raw key)`.
    pub async fn create_api_key(&self, session: &str, name: &str) -> (String, String) {
        let created = self
            .request(
                Method::POST,
                "/api/v1/api-keys",
                Credential::Session(session),
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        (
            created.body["id"].as_str().expect("key id").to_string(),
            created.body["key"].as_str().expect("raw key").to_string(),
        )
    }

    pub async fn ingest(&self, api_key: &str, body: Value) -> TestResponse {
        self.request(
            Method::POST,
            "/api/v1/events",
            Credential::ApiKey(api_key),
            Some(body),
        )
        .await
    }
}

/// A valid event body.
pub fn event_body() -> Value {
    json!({
        "customer_id": "7f1c1e6a-2d1b-4b8e-9a55-1f4f0c7b2a10",
        "sku_id": "0b8f5a0e-9b7c-4a1e-8d4e-2c6f1a3b5d70",
        "amount": 3,
        "sent_at": "2025-01-01T12:00:00Z"
    })
}

/// Full `Set-Cookie` header for the session cookie, if the response set one.
pub fn set_cookie_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("token="))
        .map(str::to_string)
}

/// The `token=...` pair from the session `Set-Cookie`, ready for a `Cookie` header.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    set_cookie_header(headers)
        .and_then(|value| value.split(';').next().map(str::to_string))
        .filter(|pair| pair != "token=")
}

pub fn error_code(response: &TestResponse) -> &str {
    response.body["error"]["code"].as_str().unwrap_or_default()
}
