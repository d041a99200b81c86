//! One merchant's credentials never reach another merchant's rows.

mod common;

use axum::http::{Method, StatusCode};
use common::{Credential, TestApp, event_body};
use serde_json::json;

#[tokio::test]
async fn keys_of_one_merchant_are_invisible_to_another() {
    let app = TestApp::new();
    let alice = app.merchant_session("alice@shop.com").await;
    let bob = app.merchant_session("bob@shop.com").await;
    app.create_api_key(&alice, "alice-key").await;

    let listed = app
        .request(Method::GET, "/api/v1/api-keys", Credential::Session(&bob), None)
        .await;

    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn revoking_another_merchants_key_changes_nothing() {
    let app = TestApp::new();
    let alice = app.merchant_session("alice@shop.com").await;
    let bob = app.merchant_session("bob@shop.com").await;
    let (alice_key_id, alice_key) = app.create_api_key(&alice, "alice-key").await;

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/api-keys/{alice_key_id}"),
            Credential::Session(&bob),
            None,
        )
        .await;
    // Same answer as for an id that does not exist.
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    assert_eq!(
        app.ingest(&alice_key, event_body()).await.status,
        StatusCode::CREATED
    );

    let listed = app
        .request(
            Method::GET,
            "/api/v1/api-keys",
            Credential::Session(&alice),
            None,
        )
        .await;
    assert!(listed.body[0]["revoked_at"].is_null());
}

#[tokio::test]
async fn skus_are_scoped_to_their_owner() {
    let app = TestApp::new();
    let alice = app.merchant_session("alice@shop.com").await;
    let bob = app.merchant_session("bob@shop.com").await;

    let created = app
        .request(
            Method::POST,
            "/api/v1/skus",
            Credential::Session(&alice),
            Some(json!({ "name": "Seat", "price_per_unit": 10.0 })),
        )
        .await;
    let sku_id = created.body["id"].as_str().expect("sku id").to_string();

    let bob_list = app
        .request(Method::GET, "/api/v1/skus", Credential::Session(&bob), None)
        .await;
    assert_eq!(bob_list.body, json!([]));

    app.request(
        Method::DELETE,
        &format!("/api/v1/skus/{sku_id}"),
        Credential::Session(&bob),
        None,
    )
    .await;

    let alice_list = app
        .request(Method::GET, "/api/v1/skus", Credential::Session(&alice), None)
        .await;
    assert_eq!(alice_list.body.as_array().expect("array").len(), 1);
    assert!(alice_list.body[0]["revoked_at"].is_null());
}

#[tokio::test]
async fn events_are_visible_only_to_the_key_owner() {
    let app = TestApp::new();
    let alice = app.merchant_session("alice@shop.com").await;
    let bob = app.merchant_session("bob@shop.com").await;
    let (_, alice_key) = app.create_api_key(&alice, "alice-key").await;

    assert_eq!(
        app.ingest(&alice_key, event_body()).await.status,
        StatusCode::CREATED
    );

    let bob_events = app
        .request(Method::GET, "/api/v1/events", Credential::Session(&bob), None)
        .await;
    assert_eq!(bob_events.status, StatusCode::OK);
    assert_eq!(bob_events.body, json!([]));

    let alice_events = app
        .request(Method::GET, "/api/v1/events", Credential::Session(&alice), None)
        .await;
    assert_eq!(alice_events.body.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn merchant_id_in_event_body_is_ignored() {
    let app = TestApp::new();
    let alice = app.merchant_session("alice@shop.com").await;
    let bob = app.merchant_session("bob@shop.com").await;
    let (_, alice_key) = app.create_api_key(&alice, "alice-key").await;

    let bob_id = app
        .request(Method::GET, "/api/v1/auth/me", Credential::Session(&bob), None)
        .await
        .body["merchant_id"]
        .clone();

    let mut body = event_body();
    body["merchant_id"] = bob_id;
    assert_eq!(app.ingest(&alice_key, body).await.status, StatusCode::CREATED);

    let bob_events = app
        .request(Method::GET, "/api/v1/events", Credential::Session(&bob), None)
        .await;
    assert_eq!(bob_events.body, json!([]));

    let alice_events = app
        .request(Method::GET, "/api/v1/events", Credential::Session(&alice), None)
        .await;
    assert_eq!(alice_events.body.as_array().expect("array").len(), 1);
}
