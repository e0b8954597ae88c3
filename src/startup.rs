//! Application startup and initialization logic.

use anyhow::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::{Config, LogFormat};
use crate::constants::server::DEFAULT_LOG_FILTER;

/// Install the global tracing subscriber.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Initialize application services and create the AppState.
pub fn initialize_app(config: &Config) -> Result<AppState> {
    info!(
        "🚀 Starting meter billing gateway ({} mode, {} KSh/kWh)",
        config.meter_mode, config.billing_rate
    );

    let mut app_state = AppState::new(config.clone());
    info!("✅ Meter state store initialized");

    match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            app_state = app_state.with_metrics(handle);
            info!("✅ Prometheus metrics initialized");
        }
        Err(e) => warn!("⚠️ Prometheus metrics disabled: {}", e),
    }

    if config.environment == "production" {
        warn!("Billing state is held in memory only and resets on restart");
    }

    Ok(app_state)
}

/// Wait for shutdown signal.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
