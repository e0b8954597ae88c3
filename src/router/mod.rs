//! Router configuration.
//!
//! Paths are fixed by the meter firmware and the SMS gateway configuration.

use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::handlers::{dashboard, device, health, metrics, payments};
use crate::middleware;

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let timeout = Duration::from_secs(app_state.config.request_timeout);

    // Device-facing endpoints
    let device_routes = Router::new()
        .route("/get_status", get(device::get_status))
        .route("/log_energy", post(device::log_energy));

    // Payment provider webhook (GET allowed for manual testing)
    let payment_routes = Router::new().route(
        "/sms",
        get(payments::handle_sms_webhook).post(payments::handle_sms_webhook),
    );

    // Operator endpoints
    let ops_routes = Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::get_prometheus_metrics));

    device_routes
        .merge(payment_routes)
        .merge(ops_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(middleware::request_logger_middleware))
                .layer(axum::middleware::from_fn(middleware::metrics_middleware))
                .layer(TimeoutLayer::with_status_code(
                    axum::http::StatusCode::REQUEST_TIMEOUT,
                    timeout,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
