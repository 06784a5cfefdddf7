use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

pub const STATUS_OK: u16 = 200;
pub const STATUS_UNPROCESSABLE: u16 = 422;
pub const STATUS_SERVER_ERROR: u16 = 500;

/// Expected, caller-side problems with an inbound event.
///
/// The `Display` text of each variant is the message returned to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("No body found in the event")]
    BodyMissing,
    #[error("amount not found in event body")]
    AmountMissing,
    #[error("amount cannot be 0")]
    AmountZero,
}

impl Rejection {
    pub fn status_code(&self) -> u16 {
        STATUS_UNPROCESSABLE
    }
}

/// Inbound request envelope. `body` holds the JSON payload as a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub body: Option<String>,
}

impl WebhookRequest {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    pub fn without_body() -> Self {
        Self::default()
    }

    /// Builds the envelope of an invoice event carrying `amount` as a JSON
    /// number written exactly as the decimal prints.
    pub fn with_amount(amount: impl Into<Decimal>) -> Self {
        let amount = amount.into();
        Self::new(format!(
            r#"{{"event": {{"log": {{"invoice": {{"amount": {amount}}}}}}}}}"#
        ))
    }

    /// Returns the body when it is present and non-empty.
    pub fn payload(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}

/// Outbound response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl WebhookResponse {
    pub fn received(received_data: &Value, transfer_ids: &[String]) -> Self {
        let body = json!({
            "message": "Webhook received",
            "received_data": received_data,
            "transfers_executed": transfer_ids,
        });
        Self {
            status_code: STATUS_OK,
            body: body.to_string(),
        }
    }

    pub fn rejected(rejection: Rejection) -> Self {
        Self::error(rejection.status_code(), &rejection.to_string())
    }

    pub fn server_error(message: &str) -> Self {
        Self::error(STATUS_SERVER_ERROR, message)
    }

    fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: json!({ "error": message }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// Parses the body back into JSON.
    pub fn json_body(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}
