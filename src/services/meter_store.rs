use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::constants::billing::{BALANCE_DECIMALS, CREDIT_DECIMALS, DEFAULT_BILLING_RATE};
use crate::error::BillingError;
use crate::models::{MeterMode, MeterState};

/// Authoritative billing state for the meter plus its outbound mailbox.
///
/// Every operation takes the lock once and finishes its read-modify-write
/// before releasing it, so concurrent payments and telemetry never lose an
/// update. Nothing awaits while the guard is held.
#[derive(Clone)]
pub struct MeterStore {
    state: Arc<Mutex<MeterState>>,
    billing_rate: f64,
}

impl MeterStore {
    /// Create a store with zeroed balances.
    ///
    /// `billing_rate` is KSh per kWh and must match the device firmware.
    pub fn new(mode: MeterMode, billing_rate: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(MeterState::new(mode))),
            billing_rate,
        }
    }

    pub fn billing_rate(&self) -> f64 {
        self.billing_rate
    }

    /// Drain the mailbox. Returns the pending command, if any.
    pub async fn take_command(&self) -> Option<String> {
        let command = self.state.lock().await.pending_command.take();
        if let Some(command) = &command {
            info!(command = %command, "Delivering command to meter");
        }
        command
    }

    /// Record a cumulative lifetime reading (kWh) for the active mode.
    ///
    /// In postpaid mode the unpaid balance is recomputed from the reading. A
    /// reading whose balance would not be a finite number is rejected.
    pub async fn record_energy(&self, total_energy: f64) -> Result<(), BillingError> {
        let total_energy = BillingError::check("totalEnergy", total_energy)?;

        let mut state = self.state.lock().await;
        let mode = state.mode;
        match mode {
            MeterMode::Prepaid => {
                state.total_energy_prepaid = total_energy;
            }
            MeterMode::Postpaid => {
                let balance =
                    BillingError::check("unpaid_balance_ksh", total_energy * self.billing_rate)?;
                state.total_energy_postpaid = total_energy;
                state.unpaid_balance_ksh = balance;
            }
        }

        debug!(
            mode = %mode,
            total_energy,
            unpaid_balance_ksh = state.unpaid_balance_ksh,
            "Recorded energy reading"
        );
        Ok(())
    }

    /// Apply a payment (KSh) and enqueue the resulting device command.
    ///
    /// Overwrites any command the device has not collected yet. Returns the
    /// command text. Nothing changes when the resulting balance would not be a
    /// finite number.
    pub async fn apply_payment(&self, amount_ksh: f64) -> Result<String, BillingError> {
        let amount_ksh = BillingError::check("amount", amount_ksh)?;

        let mut state = self.state.lock().await;
        let mode = state.mode;
        let command = match mode {
            MeterMode::Prepaid => {
                state.credit_kwh = BillingError::check(
                    "credit_kwh",
                    state.credit_kwh + amount_ksh / self.billing_rate,
                )?;
                info!(
                    amount_ksh,
                    credit_kwh = state.credit_kwh,
                    "Processed prepaid payment"
                );
                format!(
                    "Credit: {:.prec$} kWh",
                    state.credit_kwh,
                    prec = CREDIT_DECIMALS
                )
            }
            MeterMode::Postpaid => {
                state.unpaid_balance_ksh = BillingError::check(
                    "unpaid_balance_ksh",
                    (state.unpaid_balance_ksh - amount_ksh).max(0.0),
                )?;
                info!(
                    amount_ksh,
                    unpaid_balance_ksh = state.unpaid_balance_ksh,
                    "Processed postpaid payment"
                );
                format!(
                    "Balance: {:.prec$} KSh",
                    state.unpaid_balance_ksh,
                    prec = BALANCE_DECIMALS
                )
            }
        };

        state.pending_command = Some(command.clone());
        Ok(command)
    }

    /// Copy of the current state for inspection.
    pub async fn snapshot(&self) -> MeterState {
        self.state.lock().await.clone()
    }

    pub async fn mode(&self) -> MeterMode {
        self.state.lock().await.mode
    }

    /// Switch the accounting mode. Balances of the other mode are kept.
    pub async fn set_mode(&self, mode: MeterMode) {
        let mut state = self.state.lock().await;
        if state.mode != mode {
            info!(from = %state.mode, to = %mode, "Switching meter mode");
            state.mode = mode;
        }
    }
}

impl Default for MeterStore {
    fn default() -> Self {
        Self::new(MeterMode::default(), DEFAULT_BILLING_RATE)
    }
}
