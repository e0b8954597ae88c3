use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

use crate::constants::{billing, server};
use crate::models::MeterMode;

/// Log output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl LogFormat {
    /// Read `LOG_FORMAT` from the environment.
    ///
    /// Resolved before tracing is installed, so an unknown value silently
    /// falls back to pretty output.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("LOG_FORMAT")
            .and_then(|val| val.parse().ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// KSh per kWh. Must equal the value compiled into the meter firmware.
    pub billing_rate: f64,
    /// Accounting mode the meter starts in
    pub meter_mode: MeterMode,
    pub request_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: server::DEFAULT_HOST.to_string(),
            port: server::DEFAULT_PORT,
            billing_rate: billing::DEFAULT_BILLING_RATE,
            meter_mode: MeterMode::Prepaid,
            request_timeout: server::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("ENVIRONMENT") {
            config.environment = val;
        }

        if let Some(val) = lookup("HOST") {
            config.host = val;
        }

        if let Some(val) = lookup("PORT") {
            match val.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Failed to parse PORT: {}, using default", val),
            }
        }

        // The billing rate and mode are contracts with the device; never fall
        // back silently.
        if let Some(val) = lookup("BILLING_RATE") {
            config.billing_rate = val
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidValue("BILLING_RATE".to_string(), val.clone()))?;
            info!("Using billing rate: {} KSh/kWh", config.billing_rate);
        }

        if let Some(val) = lookup("METER_MODE") {
            config.meter_mode = val
                .parse::<MeterMode>()
                .map_err(|_| ConfigError::InvalidValue("METER_MODE".to_string(), val.clone()))?;
        }

        if let Some(val) = lookup("REQUEST_TIMEOUT") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = secs,
                Ok(_) => warn!(
                    "Invalid REQUEST_TIMEOUT: {}, must be > 0, using default",
                    val
                ),
                Err(_) => warn!("Failed to parse REQUEST_TIMEOUT: {}, using default", val),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.billing_rate.is_finite() || self.billing_rate <= 0.0 {
            return Err(ConfigError::ValidationFailed(format!(
                "BILLING_RATE must be a positive number, got {}",
                self.billing_rate
            )));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::ValidationFailed(
                "REQUEST_TIMEOUT must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable {0} has invalid value '{1}'")]
    InvalidValue(String, String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}
