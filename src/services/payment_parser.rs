//! Amount extraction from M-Pesa confirmation messages.
//!
//! Contract of [`parse_payment_amount`]:
//! - the amount is introduced by the literal `Ksh` marker,
//! - digits may be grouped with commas (`1,234.56`),
//! - exactly two fractional digits follow the decimal point,
//! - surrounding text is ignored and only the first occurrence counts.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::constants::payment::CURRENCY_MARKER;

static PAYMENT_AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"{}([\d,]+\.\d{{2}})", regex::escape(CURRENCY_MARKER));
    Regex::new(&pattern).expect("payment amount pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaymentParseError {
    #[error("no Ksh amount found in message")]
    AmountNotFound,

    #[error("amount '{0}' is not a usable number")]
    InvalidAmount(String),
}

/// Extract the paid amount (KSh) from a payment notification text.
pub fn parse_payment_amount(message: &str) -> Result<f64, PaymentParseError> {
    let captures = PAYMENT_AMOUNT_PATTERN
        .captures(message)
        .ok_or(PaymentParseError::AmountNotFound)?;

    let raw = &captures[1];
    let digits: String = raw.chars().filter(|c| *c != ',').collect();

    let amount: f64 = digits
        .parse()
        .map_err(|_| PaymentParseError::InvalidAmount(raw.to_string()))?;

    if !amount.is_finite() {
        return Err(PaymentParseError::InvalidAmount(raw.to_string()));
    }

    Ok(amount)
}
