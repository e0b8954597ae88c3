use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use std::time::Instant;

use crate::models::MeterMode;

/// Path label for requests that hit no route
const UNMATCHED_PATH: &str = "unmatched";

/// Route template of the request, so unknown paths share one series.
fn path_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string())
}

/// Metrics middleware that tracks request metrics
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = path_label(&request);
    let start = Instant::now();

    counter!("http_requests_total", "method" => method.to_string(), "path" => path.clone())
        .increment(1);

    let response = next.run(request).await;

    let status = response.status();
    let duration = start.elapsed();

    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.clone(),
        "status" => status.as_u16().to_string()
    )
    .record(duration.as_secs_f64());

    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path,
        "status" => status.as_u16().to_string()
    )
    .increment(1);

    response
}

/// Track a command handed to the meter on poll
pub fn track_command_delivered() {
    counter!("meter_commands_delivered_total").increment(1);
}

/// Track telemetry pushes
pub fn track_energy_report(success: bool) {
    counter!("meter_energy_reports_total", "success" => success.to_string()).increment(1);
}

/// Track payment notifications
pub fn track_payment(mode: MeterMode, success: bool) {
    counter!(
        "meter_payments_total",
        "mode" => mode.as_str(),
        "success" => success.to_string()
    )
    .increment(1);
}
