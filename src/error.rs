use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },
    /// An error reported by the payment provider itself (card declined, incomplete number...).
    #[error("{0}")]
    Provider(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CheckoutError {
    /// Returns the provider's message when this error came from the payment provider.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Provider(message) => Some(message),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
