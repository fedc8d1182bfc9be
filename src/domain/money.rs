use crate::error::CheckoutError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A currency amount as shown on the order summary.
///
/// Wraps `rust_decimal::Decimal` so fees are summed without floating point drift.
/// Serializes as a JSON number, which is what the backend stores. Deserializes from either
/// a number or a numeric string, and rejects negative amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Money(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

/// A strictly positive amount that can be charged.
///
/// A zero total never produces a `ChargeAmount`, so no payment intent can be requested for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize)]
pub struct ChargeAmount(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = CheckoutError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(CheckoutError::ValidationError(format!(
                "Amount must not be negative: {value}"
            )));
        }
        Ok(Self(value))
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

impl ChargeAmount {
    pub fn new(value: Money) -> Result<Self, CheckoutError> {
        if value.0 > Decimal::ZERO {
            Ok(Self(value.0))
        } else {
            Err(CheckoutError::ValidationError(
                "Charge amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Money> for ChargeAmount {
    type Error = CheckoutError;

    fn try_from(value: Money) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChargeAmount> for Money {
    fn from(amount: ChargeAmount) -> Self {
        Self(amount.0)
    }
}
