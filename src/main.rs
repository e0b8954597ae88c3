use anyhow::Result;
use tracing::info;

use meter_billing_gateway::config::{Config, LogFormat};
use meter_billing_gateway::{build_router, startup};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first
    dotenvy::dotenv().ok();

    // Tracing must be up before config parsing so its warnings are visible
    startup::init_tracing(LogFormat::from_env());

    let config = Config::from_env()?;
    info!("Loaded configuration for environment: {}", config.environment);

    let app_state = startup::initialize_app(&config)?;
    let app = build_router(app_state);

    let addr = config.bind_address();
    info!("Starting meter billing gateway on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    Ok(())
}
