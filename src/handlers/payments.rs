//! Payment notification webhook (SMS forwarded by the gateway provider).

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    Form,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::constants::payment;
use crate::error::{ApiError, Result};
use crate::middleware::metrics::track_payment;
use crate::services::{parse_payment_amount, MeterStore};

/// Webhook form. `Body` holds the raw SMS text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmsWebhook {
    #[serde(rename = "Body", default)]
    pub body: Option<String>,
}

/// Apply a payment announced by SMS.
/// GET|POST /sms
///
/// `Body` is taken from the urlencoded form first and from the query string
/// otherwise, so both `POST /sms?Body=...` and a browser GET work.
pub async fn handle_sms_webhook(
    State(store): State<MeterStore>,
    query: std::result::Result<Query<SmsWebhook>, QueryRejection>,
    form: std::result::Result<Form<SmsWebhook>, FormRejection>,
) -> Result<&'static str> {
    let mode = store.mode().await;

    let form_body = match form {
        Ok(Form(webhook)) => webhook.body,
        Err(rejection) => {
            debug!("No usable webhook form: {}", rejection.body_text());
            None
        }
    };
    let query_body = query.ok().and_then(|Query(webhook)| webhook.body);

    let text = match form_body.or(query_body) {
        Some(text) => text.trim().to_string(),
        None => {
            warn!("Webhook carried no {} field", payment::BODY_FIELD);
            track_payment(mode, false);
            return Err(ApiError::PaymentNotParsed(format!(
                "missing {} field",
                payment::BODY_FIELD
            )));
        }
    };
    info!(sms = %text, "Received payment SMS");

    let amount_ksh = parse_payment_amount(&text).map_err(|e| {
        warn!(error = %e, "Could not find payment amount in SMS");
        track_payment(mode, false);
        ApiError::from(e)
    })?;

    let command = store.apply_payment(amount_ksh).await.map_err(|e| {
        warn!(error = %e, "Payment amount rejected");
        track_payment(mode, false);
        ApiError::PaymentNotParsed(e.to_string())
    })?;

    info!(amount_ksh, command = %command, "Payment applied, command queued for meter");
    track_payment(mode, true);
    Ok(payment::PROCESSED)
}
