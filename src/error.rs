use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::constants::{device, payment};
use crate::handlers::response::StatusResponse;
use crate::services::payment_parser::PaymentParseError;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Rejections raised by the meter state store.
///
/// Every variant leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} cannot be negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },
}

impl BillingError {
    /// Check that `value` is finite and non-negative.
    pub fn check(field: &'static str, value: f64) -> std::result::Result<f64, BillingError> {
        if !value.is_finite() {
            return Err(BillingError::NonFinite { field, value });
        }
        if value < 0.0 {
            return Err(BillingError::NegativeValue { field, value });
        }
        Ok(value)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Telemetry body missing, malformed or carrying an unusable reading
    #[error("Invalid telemetry: {0}")]
    InvalidTelemetry(String),

    /// No usable amount in the payment notification
    #[error("Payment not parsed: {0}")]
    PaymentNotParsed(String),
}

impl ApiError {
    /// Get status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidTelemetry(_) | ApiError::PaymentNotParsed(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Log at warn level; every variant is a client error
    fn log_error(&self) {
        warn!(
            status = self.status_code().as_u16(),
            error = %self,
            "Client error occurred"
        );
    }
}

impl From<PaymentParseError> for ApiError {
    fn from(err: PaymentParseError) -> Self {
        ApiError::PaymentNotParsed(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.log_error();

        // The device firmware and the SMS gateway match on these exact bodies.
        match self {
            ApiError::InvalidTelemetry(_) => (
                status,
                Json(StatusResponse::error(device::INVALID_DATA_FORMAT)),
            )
                .into_response(),
            ApiError::PaymentNotParsed(_) => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                payment::NOT_PARSED,
            )
                .into_response(),
        }
    }
}
