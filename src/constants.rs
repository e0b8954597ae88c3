//! Application constants and protocol strings.
//!
//! Values here are shared with the meter firmware or the payment provider and
//! must not drift from what those systems expect.

/// Billing constants shared with the device firmware
pub mod billing {
    /// Default billing rate in KSh per kWh.
    ///
    /// The firmware converts between energy and currency with its own copy of
    /// this value. Both sides must agree or prepaid credit and postpaid debt
    /// will diverge.
    pub const DEFAULT_BILLING_RATE: f64 = 10.0;

    /// Decimal places used when reporting prepaid credit to the device
    pub const CREDIT_DECIMALS: usize = 4;

    /// Decimal places used when reporting postpaid balance to the device
    pub const BALANCE_DECIMALS: usize = 2;
}

/// Device protocol messages
pub mod device {
    /// Poll response when the mailbox is empty
    pub const NO_COMMAND: &str = "OK. No new commands.";

    /// Telemetry acknowledgement
    pub const DATA_RECEIVED: &str = "Data received";

    /// Telemetry rejection
    pub const INVALID_DATA_FORMAT: &str = "Invalid data format";
}

/// Payment webhook constants
pub mod payment {
    /// Currency marker preceding the amount in M-Pesa confirmation texts
    pub const CURRENCY_MARKER: &str = "Ksh";

    /// Form field carrying the SMS text
    pub const BODY_FIELD: &str = "Body";

    /// Webhook acknowledgement
    pub const PROCESSED: &str = "Payment processed successfully.";

    /// Webhook rejection
    pub const NOT_PARSED: &str = "Could not parse payment from message.";
}

/// Server defaults
pub mod server {
    /// Default bind host
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default listen port
    pub const DEFAULT_PORT: u16 = 5000;

    /// Default request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Default tracing filter when RUST_LOG is unset
    pub const DEFAULT_LOG_FILTER: &str = "meter_billing_gateway=debug,tower_http=debug";
}
