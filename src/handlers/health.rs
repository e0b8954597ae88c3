use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::models::MeterMode;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub environment: String,
    pub mode: MeterMode,
    pub billing_rate: f64,
}

impl HealthStatus {
    pub fn new(environment: &str, mode: MeterMode, billing_rate: f64) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: environment.to_string(),
            mode,
            billing_rate,
        }
    }
}

/// Basic health check endpoint
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let mode = state.meter_store.mode().await;
    Json(HealthStatus::new(
        &state.config.environment,
        mode,
        state.meter_store.billing_rate(),
    ))
}
