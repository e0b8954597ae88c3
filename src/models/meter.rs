use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accounting mode of the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterMode {
    /// Device draws down purchased credit; payments add kWh.
    #[default]
    Prepaid,
    /// Device accrues debt from consumption; payments reduce it.
    Postpaid,
}

impl MeterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeterMode::Prepaid => "prepaid",
            MeterMode::Postpaid => "postpaid",
        }
    }
}

impl fmt::Display for MeterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown meter mode '{0}', expected 'prepaid' or 'postpaid'")]
pub struct UnknownMeterMode(pub String);

impl FromStr for MeterMode {
    type Err = UnknownMeterMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prepaid" => Ok(MeterMode::Prepaid),
            "postpaid" => Ok(MeterMode::Postpaid),
            _ => Err(UnknownMeterMode(s.to_string())),
        }
    }
}

/// Billing state of the single metered installation.
///
/// Field names on the wire match what the dashboard and device tooling
/// already consume.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeterState {
    /// Last cumulative reading reported while in prepaid mode (kWh)
    #[serde(rename = "totalEnergy_prepaid")]
    pub total_energy_prepaid: f64,
    /// Last cumulative reading reported while in postpaid mode (kWh)
    #[serde(rename = "totalEnergy_postpaid")]
    pub total_energy_postpaid: f64,
    /// Purchased energy not yet consumed (kWh)
    pub credit_kwh: f64,
    /// Outstanding postpaid debt (KSh)
    pub unpaid_balance_ksh: f64,
    pub mode: MeterMode,
    /// Single-slot mailbox drained by the next device poll
    #[serde(rename = "last_command_for_esp")]
    pub pending_command: Option<String>,
}

impl MeterState {
    /// Fresh state: everything zeroed, no pending command.
    pub fn new(mode: MeterMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}
