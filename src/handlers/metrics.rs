// Metrics endpoint for Prometheus

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

/// Prometheus metrics endpoint
/// GET /metrics
///
/// Renders an empty exposition when no recorder was installed (tests, embedded use).
pub async fn get_prometheus_metrics(State(state): State<AppState>) -> Response {
    let metrics_text = state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics_text,
    )
        .into_response()
}
