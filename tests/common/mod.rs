//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use card_purchase_bridge::{
    app::{self, AppState},
    config::Config,
    services::{purchase_service::PurchaseService, trace::SequentialTraceNumbers},
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TMK: &str = "E6FBFD2C914A155D";
pub const TWK: &str = "2277898cef81413e";
pub const PAN: &str = "9222081700176714465";
pub const PIN_BLOCK: &str = "d122f06d07b3ef95";

/// Helper function to create test config pointing at mocked dependencies
pub fn test_config(pin_service_url: &str, gateway_base_url: &str) -> Config {
    test_config_with_timeout(pin_service_url, gateway_base_url, 5)
}

pub fn test_config_with_timeout(
    pin_service_url: &str,
    gateway_base_url: &str,
    timeout_secs: u64,
) -> Config {
    Config::from_pairs(vec![
        ("PIN_SERVICE_URL".to_string(), pin_service_url.to_string()),
        (
            "GATEWAY_CHARGE_URL".to_string(),
            format!("{}/charge/", gateway_base_url),
        ),
        ("TERMINAL_MASTER_KEY".to_string(), TMK.to_string()),
        ("TERMINAL_WORKING_KEY".to_string(), TWK.to_string()),
        ("HTTP_TIMEOUT_SECS".to_string(), timeout_secs.to_string()),
    ])
    .expect("test config is valid")
}

pub fn test_app(config: &Config) -> Router {
    let purchases = PurchaseService::from_config(config, Arc::new(SequentialTraceNumbers::default()))
        .expect("http client builds");

    app::router(AppState {
        purchases,
        terminal_working_key: Arc::from(config.terminal_working_key.as_str()),
    })
}

pub fn purchase_body() -> Value {
    json!({
        "terminalId": "18000377",
        "clientId": "ACTS",
        "PAN": PAN,
        "pin": PIN_BLOCK,
        "expDate": "2406",
        "tranAmount": 250.0,
        "tranDateTime": "201120112233"
    })
}

pub fn gateway_success_body() -> Value {
    json!({
        "card_number": PAN,
        "expiration_date": "2406",
        "amount_in_sdg": 250.0,
        "amount_USD": 12.5,
        "country": "United States of America",
        "currency": "USD",
        "paymentinfo": {
            "id": "ch_1HqciJI3cm72eLmjOEU6YzY2",
            "captured": true,
            "created": true,
            "currency": "usd",
            "customer": null,
            "description": "International charge",
            "paid": true,
            "payment_method": "card_1HqciJI3cm72eLmjNwrbmbZn",
            "refunded": false,
            "status": "succeeded"
        }
    })
}

/// Send a request through the router and decode the JSON answer.
pub async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn post_purchase(app: Router, body: &Value) -> (StatusCode, Value) {
    send(app, "POST", "/purchase", Body::from(body.to_string())).await
}
