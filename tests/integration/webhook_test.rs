//! Payment webhook parsing and rejection behaviour.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{get, post_form, post_sms, send, sms_form, test_app};
use meter_billing_gateway::models::MeterMode;

#[tokio::test]
async fn test_grouped_amount_via_post() {
    let (state, router) = test_app(MeterMode::Prepaid);

    let res = post_sms(
        &router,
        "EA54 Confirmed. You have received Ksh1,234.56 from John",
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);

    let credit = state.meter_store.snapshot().await.credit_kwh;
    assert!((credit - 123.456).abs() < 1e-9);
}

#[tokio::test]
async fn test_get_reads_body_from_query() {
    let (state, router) = test_app(MeterMode::Prepaid);

    let uri = format!("/sms?{}", sms_form("Confirmed. Ksh20.00 received"));
    let res = get(&router, &uri).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type.starts_with("text/plain"));
    assert_eq!(res.body, "Payment processed successfully.");

    assert_eq!(state.meter_store.snapshot().await.credit_kwh, 2.0);
}

#[tokio::test]
async fn test_post_falls_back_to_query_string() {
    let (state, router) = test_app(MeterMode::Prepaid);

    let uri = format!("/sms?{}", sms_form("Ksh20.00 received"));
    let res = post_form(&router, &uri, "").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "Payment processed successfully.");
    assert_eq!(state.meter_store.snapshot().await.credit_kwh, 2.0);

    let res = get(&router, "/get_status").await;
    assert_eq!(res.json()["message"], "Credit: 2.0000 kWh");
}

#[tokio::test]
async fn test_form_body_wins_over_query_string() {
    let (state, router) = test_app(MeterMode::Prepaid);

    let uri = format!("/sms?{}", sms_form("Ksh90.00 received"));
    let res = post_form(&router, &uri, &sms_form("Ksh20.00 received")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(state.meter_store.snapshot().await.credit_kwh, 2.0);
}

#[tokio::test]
async fn test_query_string_used_with_json_content_type() {
    let (state, router) = test_app(MeterMode::Prepaid);

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/sms?{}", sms_form("Ksh10.00 received")))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let res = send(&router, request).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(state.meter_store.snapshot().await.credit_kwh, 1.0);
}

#[tokio::test]
async fn test_overflowing_amount_is_rejected() {
    let (state, router) = test_app(MeterMode::Prepaid);
    let before = state.meter_store.snapshot().await;

    let message = format!("Confirmed. Ksh{}.00 received", "9".repeat(400));
    let res = post_sms(&router, &message).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "Could not parse payment from message.");

    assert_eq!(state.meter_store.snapshot().await, before);
    let res = get(&router, "/get_status").await;
    assert_eq!(res.json()["message"], "OK. No new commands.");
}

#[tokio::test]
async fn test_huge_payments_never_overflow_credit() {
    let (state, router) = test_app(MeterMode::Prepaid);
    let message = format!("Ksh1{}.00 received", "0".repeat(308));

    let mut rejected = 0;
    for _ in 0..20 {
        let res = post_sms(&router, &message).await;
        if res.status == StatusCode::BAD_REQUEST {
            assert_eq!(res.body, "Could not parse payment from message.");
            rejected += 1;
        }
    }
    assert!(rejected > 0);

    assert!(state.meter_store.snapshot().await.credit_kwh.is_finite());
    let res = get(&router, "/dashboard").await;
    assert!(res.json()["credit_kwh"].is_f64());
}

#[tokio::test]
async fn test_unparsable_message_changes_nothing() {
    let (state, router) = test_app(MeterMode::Prepaid);
    let before = state.meter_store.snapshot().await;

    let res = post_sms(&router, "You have received 50.00 from John").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.content_type.starts_with("text/plain"));
    assert_eq!(res.body, "Could not parse payment from message.");

    assert_eq!(state.meter_store.snapshot().await, before);

    let res = get(&router, "/get_status").await;
    assert_eq!(res.json()["message"], "OK. No new commands.");
}

#[tokio::test]
async fn test_missing_body_field_is_rejected() {
    let (_state, router) = test_app(MeterMode::Prepaid);

    let res = get(&router, "/sms").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "Could not parse payment from message.");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/sms")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"Body": "Ksh10.00"}"#))
        .unwrap();
    let res = send(&router, request).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, "Could not parse payment from message.");
}

#[tokio::test]
async fn test_unclaimed_command_is_overwritten() {
    let (_state, router) = test_app(MeterMode::Prepaid);

    post_sms(&router, "Ksh10.00 received").await;
    post_sms(&router, "Ksh30.00 received").await;

    let res = get(&router, "/get_status").await;
    assert_eq!(res.json()["message"], "Credit: 4.0000 kWh");
    let res = get(&router, "/get_status").await;
    assert_eq!(res.json()["message"], "OK. No new commands.");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (_state, router) = test_app(MeterMode::Prepaid);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/get_status")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
