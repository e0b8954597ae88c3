use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request logging middleware that logs all incoming requests and responses
pub async fn request_logger_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client = client_address(request.headers()).unwrap_or_else(|| "direct".to_string());
    let start = Instant::now();

    debug!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        client = %client,
        "Incoming request"
    );

    let mut response = next.run(request).await;

    let status = response.status();
    let duration = start.elapsed();

    match status {
        status if status.is_success() => {
            info!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                status = %status,
                duration_ms = %duration.as_millis(),
                "Request completed successfully"
            );
        }
        status if status.is_client_error() => {
            warn!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                client = %client,
                status = %status,
                duration_ms = %duration.as_millis(),
                "Request failed with client error"
            );
        }
        status if status.is_server_error() => {
            error!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                status = %status,
                duration_ms = %duration.as_millis(),
                "Request failed with server error"
            );
        }
        _ => {
            debug!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                status = %status,
                duration_ms = %duration.as_millis(),
                "Request completed"
            );
        }
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Originating address as reported by the reverse proxy, if any
fn client_address(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
