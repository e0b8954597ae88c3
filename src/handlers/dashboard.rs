use axum::{extract::State, Json};

use crate::models::MeterState;
use crate::services::MeterStore;

/// Full billing state for operators. Read-only.
/// GET /dashboard
pub async fn get_dashboard(State(store): State<MeterStore>) -> Json<MeterState> {
    Json(store.snapshot().await)
}
