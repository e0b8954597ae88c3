//! Application state shared across all handlers.

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::Config;
use crate::services::MeterStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Billing state and device mailbox
    pub meter_store: MeterStore,
    /// Prometheus renderer, absent when no recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// State with a fresh store built from `config` and no metrics exporter.
    pub fn new(config: Config) -> Self {
        let meter_store = MeterStore::new(config.meter_mode, config.billing_rate);
        Self {
            config,
            meter_store,
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}

impl axum::extract::FromRef<AppState> for MeterStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.meter_store.clone()
    }
}
