use super::money::Money;
use std::fmt;

/// Pages the checkout can send the applicant to, with the state each one receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    PaymentFailed {
        scholarship_name: String,
        error: String,
    },
    PaymentSuccess {
        scholarship_name: String,
        university_name: String,
        amount: Money,
        transaction_id: String,
    },
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::PaymentFailed { .. } => "/payment-failed",
            Self::PaymentSuccess { .. } => "/payment-success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
