//! Endpoints called by the meter firmware.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::constants::device;
use crate::error::{ApiError, Result};
use crate::handlers::response::{MessageResponse, StatusResponse};
use crate::middleware::metrics::{track_command_delivered, track_energy_report};
use crate::services::MeterStore;

/// Telemetry payload pushed by the device
#[derive(Debug, Clone, Deserialize)]
pub struct EnergyReport {
    /// Cumulative lifetime reading in kWh
    #[serde(rename = "totalEnergy")]
    pub total_energy: f64,
}

/// Device poll: hand over the pending command, if any.
/// GET /get_status
pub async fn get_status(State(store): State<MeterStore>) -> Json<MessageResponse> {
    match store.take_command().await {
        Some(command) => {
            track_command_delivered();
            Json(MessageResponse::new(command))
        }
        None => Json(MessageResponse::new(device::NO_COMMAND)),
    }
}

/// Device telemetry push.
/// POST /log_energy
pub async fn log_energy(
    State(store): State<MeterStore>,
    payload: std::result::Result<Json<EnergyReport>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let Json(report) = payload.map_err(|rejection| {
        warn!("Rejected telemetry payload: {}", rejection.body_text());
        track_energy_report(false);
        ApiError::InvalidTelemetry(rejection.body_text())
    })?;

    store
        .record_energy(report.total_energy)
        .await
        .map_err(|e| {
            track_energy_report(false);
            ApiError::InvalidTelemetry(e.to_string())
        })?;

    debug!(total_energy = report.total_energy, "Energy reading accepted");
    track_energy_report(true);
    Ok(Json(StatusResponse::success(device::DATA_RECEIVED)))
}
