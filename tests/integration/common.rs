#![allow(dead_code)]

//! Shared helpers for driving the router in-process.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use meter_billing_gateway::config::Config;
use meter_billing_gateway::models::MeterMode;
use meter_billing_gateway::{build_router, AppState};

/// Fresh state and router with the firmware's default rate (10 KSh/kWh).
pub fn test_app(mode: MeterMode) -> (AppState, Router) {
    let config = Config {
        meter_mode: mode,
        ..Config::default()
    };
    let state = AppState::new(config);
    let router = build_router(state.clone());
    (state, router)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

pub async fn post_json(router: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

/// POST an SMS webhook the way the gateway provider does (urlencoded form).
pub async fn post_sms(router: &Router, text: &str) -> TestResponse {
    post_form(router, "/sms", &sms_form(text)).await
}

pub async fn post_form(router: &Router, uri: &str, form: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(router, request).await
}

/// `Body=<text>` urlencoded, usable as a form body or a query string.
pub fn sms_form(text: &str) -> String {
    serde_urlencoded::to_string([("Body", text)]).expect("form encodes")
}
