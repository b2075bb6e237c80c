//! Gateway operation integration tests against a mock Stripe API.

mod common;

use axum::http::StatusCode;
use common::{test_settings, TestHarness};
use serde_json::json;
use stripe_gateway_store::CustomerStore;
use wiremock::matchers::{any, basic_auth, body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn requests_without_api_key_are_rejected() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/v1/gateway/metadata").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn requests_with_wrong_api_key_are_rejected() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/v1/gateway/refund")
        .add_header(
            axum::http::HeaderName::from_static("x-api-key"),
            axum::http::HeaderValue::from_static("wrong-key"),
        )
        .json(&json!({ "transid": "ch_1" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Metadata and configuration
// ============================================================================

#[tokio::test]
async fn metadata_declares_tokenised_storage() {
    let harness = TestHarness::new().await;

    let response = harness.get("/v1/gateway/metadata").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["DisplayName"], "Stripe");
    assert_eq!(body["APIVersion"], "1.1");
    assert_eq!(body["TokenisedStorage"], true);
    assert_eq!(body["DisableLocalCreditCardInput"], false);
}

#[tokio::test]
async fn config_lists_fields_in_order() {
    let harness = TestHarness::new().await;

    let response = harness.get("/v1/gateway/config").await;

    response.assert_status_ok();
    let body: Vec<serde_json::Value> = response.json();
    let keys: Vec<_> = body.iter().map(|f| f["key"].as_str().unwrap()).collect();
    assert_eq!(
        keys,
        [
            "FriendlyName",
            "testSecretKey",
            "testPublicKey",
            "liveSecretKey",
            "livePublicKey",
            "testMode"
        ]
    );
    assert_eq!(body[0]["Type"], "System");
    assert_eq!(body[0]["Value"], "Stripe");
    assert_eq!(body[5]["Type"], "yesno");
}

#[tokio::test]
async fn schema_bootstrap_succeeds() {
    let harness = TestHarness::new().await;

    let response = harness.post("/v1/gateway/schema").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

// ============================================================================
// Capture
// ============================================================================

#[tokio::test]
async fn capture_charges_stored_customer() {
    let harness = TestHarness::new().await;
    harness
        .store
        .insert("cus_ann", "ann@example.com")
        .await
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/charges"))
        .and(basic_auth("sk_test_harness", ""))
        .and(body_string_contains("amount=4250"))
        .and(body_string_contains("currency=eur"))
        .and(body_string_contains("customer=cus_ann"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"id":"ch_42","object":"charge"}"#),
        )
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .post("/v1/gateway/capture")
        .json(&json!({
            "amount": "42.50",
            "currency": "EUR",
            "description": "Invoice #1001",
            "clientdetails": { "email": "ann@example.com" }
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["transid"], "ch_42");
    assert_eq!(body["rawdata"], r#"{"id":"ch_42","object":"charge"}"#);
}

#[tokio::test]
async fn capture_decline_is_reported_not_errored() {
    let harness = TestHarness::new().await;
    harness
        .store
        .insert("cus_ann", "ann@example.com")
        .await
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/charges"))
        .respond_with(ResponseTemplate::new(402).set_body_string(
            r#"{"error":{"type":"card_error","code":"card_declined","message":"Your card was declined."}}"#,
        ))
        .mount(&harness.stripe)
        .await;

    let response = harness
        .post("/v1/gateway/capture")
        .json(&json!({
            "amount": 10,
            "currency": "usd",
            "clientdetails": { "email": "ann@example.com" }
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "declined");
    assert!(body.get("transid").is_none());
    assert!(body["rawdata"].as_str().unwrap().contains("card_declined"));
}

#[tokio::test]
async fn capture_with_invalid_amount_is_bad_request() {
    let harness = TestHarness::new().await;

    let response = harness
        .post("/v1/gateway/capture")
        .json(&json!({
            "amount": "ten",
            "currency": "usd",
            "clientdetails": { "email": "ann@example.com" }
        }))
        .expect_failure()
        .await;

    assert!(response.status_code().is_client_error());
}

// ============================================================================
// Refund
// ============================================================================

#[tokio::test]
async fn refund_success() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path("/refunds"))
        .and(body_string_contains("charge=ch_42"))
        .and(body_string_contains("amount=1000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"re_1"}"#))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .post("/v1/gateway/refund")
        .json(&json!({ "transid": "ch_42", "amount": "10.00" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["transid"], "re_1");
}

#[tokio::test]
async fn refund_failure() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path("/refunds"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"error":{"type":"invalid_request_error","code":"charge_already_refunded","message":"Charge ch_42 has already been refunded."}}"#,
        ))
        .mount(&harness.stripe)
        .await;

    let response = harness
        .post("/v1/gateway/refund")
        .json(&json!({ "transid": "ch_42" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "failed");
    assert!(body["rawdata"]
        .as_str()
        .unwrap()
        .contains("charge_already_refunded"));
}

// ============================================================================
// Store remote
// ============================================================================

#[tokio::test]
async fn tokenize_with_browser_token_creates_mapping() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(body_string_contains("email=bob%40example.com"))
        .and(body_string_contains("source=tok_123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"id":"cus_bob","default_source":"card_2","sources":{"data":[{"id":"card_1"},{"id":"card_2"}]}}"#,
        ))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .post("/v1/gateway/storeremote")
        .json(&json!({
            "clientdetails": { "email": "bob@example.com" },
            "cardnum": "************4242",
            "cardexp": "1230",
            "stripeToken": "tok_123"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["gatewayid"], "card_1");

    assert_eq!(harness.store.len().await, 1);
    let mapping = harness
        .store
        .find_by_email("bob@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mapping.processor_customer_id, "cus_bob");
}

#[tokio::test]
async fn removal_without_stored_customer_makes_no_call() {
    let harness = TestHarness::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .post("/v1/gateway/storeremote")
        .json(&json!({
            "clientdetails": { "email": "carol@example.com" },
            "cardnum": "",
            "gatewayid": "card_1"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({ "status": "success" }));
}

#[tokio::test]
async fn removal_deletes_stored_card() {
    let harness = TestHarness::new().await;
    harness
        .store
        .insert("cus_dan", "dan@example.com")
        .await
        .unwrap();

    Mock::given(method("DELETE"))
        .and(path("/customers/cus_dan/sources/card_7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"id":"card_7","deleted":true}"#),
        )
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .post("/v1/gateway/storeremote")
        .json(&json!({
            "clientdetails": { "email": "dan@example.com" },
            "gatewayid": "card_7"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["rawdata"], r#"{"id":"card_7","deleted":true}"#);
}

// ============================================================================
// Credential selection
// ============================================================================

#[tokio::test]
async fn live_mode_uses_live_secret_key() {
    let harness = TestHarness::with_settings(test_settings(false)).await;

    Mock::given(method("POST"))
        .and(path("/refunds"))
        .and(basic_auth("sk_live_harness", ""))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"re_live"}"#))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .post("/v1/gateway/refund")
        .json(&json!({ "transid": "ch_1" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["transid"], "re_live");
}

#[tokio::test]
async fn live_mode_capture_uses_live_secret_key() {
    let harness = TestHarness::with_settings(test_settings(false)).await;
    harness
        .store
        .insert("cus_live", "erin@example.com")
        .await
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/charges"))
        .and(basic_auth("sk_live_harness", ""))
        .and(body_string_contains("customer=cus_live"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"ch_live"}"#))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .post("/v1/gateway/capture")
        .json(&json!({
            "amount": 5,
            "currency": "usd",
            "clientdetails": { "email": "erin@example.com" }
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["transid"], "ch_live");
}
