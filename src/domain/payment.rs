use serde::{Deserialize, Serialize};
use std::fmt;

/// Authorization handle returned by `/create-payment-intent`.
///
/// Good for a single confirmation attempt.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The payment intent id embedded in the secret (`pi_xxx_secret_yyy` -> `pi_xxx`).
    pub fn intent_id(&self) -> &str {
        self.0
            .split_once("_secret_")
            .map_or(self.0.as_str(), |(id, _)| id)
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientSecret({}_secret_***)", self.intent_id())
    }
}

/// Card data as entered in the hosted card field.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub cvc: String,
}

/// Keeps the last four digits of a card number.
pub fn mask_pan(pan: &str) -> String {
    let digits: Vec<char> = pan.chars().filter(|c| !c.is_whitespace()).collect();
    let len = digits.len();
    if len > 4 {
        "*".repeat(len - 4) + &digits[len - 4..].iter().collect::<String>()
    } else {
        "*".repeat(len)
    }
}

// Keep card data out of logs and panic messages
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &mask_pan(&self.number))
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvc", &"***")
            .finish()
    }
}

/// Billing identity attached to the tokenized card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
}

/// A tokenized card returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    Succeeded,
    Processing,
    RequiresAction,
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresCapture,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Succeeded => "succeeded",
            Self::Processing => "processing",
            Self::RequiresAction => "requires_action",
            Self::RequiresPaymentMethod => "requires_payment_method",
            Self::RequiresConfirmation => "requires_confirmation",
            Self::RequiresCapture => "requires_capture",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
        };
        f.write_str(status)
    }
}

/// Result of a confirmation call that the provider did not reject outright.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentIntent {
    /// Provider transaction id (`pi_...`).
    pub id: String,
    pub status: IntentStatus,
}

impl PaymentIntent {
    pub fn succeeded(&self) -> bool {
        self.status == IntentStatus::Succeeded
    }
}
