use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayhookError {
    #[error("Failed to retrieve secret {name}: {reason}")]
    SecretAccess { name: String, reason: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Payment API error ({status}): {message}")]
    PaymentApi { status: u16, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PayhookError {
    pub fn secret_access(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SecretAccess {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PayhookError>;
