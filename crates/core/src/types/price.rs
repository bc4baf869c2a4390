//! Type-safe price representation using decimal arithmetic.
//!
//! Prices arrive in request bodies either as JSON numbers (`19.99`) or as
//! numeric strings (`"19.99"`). Both forms are parsed into a [`Decimal`] so the
//! positivity check is exact; the document store keeps the amount as a double.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The value is not a number or numeric string.
    #[error("Price must be a valid number")]
    NotANumber,
    /// The amount is zero or negative.
    #[error("Price must be greater than 0")]
    NotPositive,
    /// The amount is positive but needs more than 28 decimal digits of
    /// range or precision.
    #[error("Price is out of range")]
    OutOfRange,
}

/// A strictly positive product price in the store's standard currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "f64")]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotPositive` if the amount is zero or negative.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        Ok(Self(amount))
    }

    /// Parse a price from a JSON value (number or numeric string).
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotANumber` for non-numeric or non-finite values,
    /// `PriceError::NotPositive` for amounts that are zero or negative, and
    /// `PriceError::OutOfRange` for positive amounts a `Decimal` cannot hold
    /// (such as `1e30` or `1e-30`).
    pub fn from_json(value: &Value) -> Result<Self, PriceError> {
        let text = match value {
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.trim().to_owned(),
            _ => return Err(PriceError::NotANumber),
        };

        let float = text.parse::<f64>().ok().filter(|v| v.is_finite());
        match (parse_decimal(&text), float) {
            (Some(amount), _) if amount > Decimal::ZERO => Ok(Self(amount)),
            (_, Some(amount)) if amount > 0.0 => Err(PriceError::OutOfRange),
            (Some(_), _) | (_, Some(_)) => Err(PriceError::NotPositive),
            (None, None) => Err(PriceError::NotANumber),
        }
    }

    /// Create a price from a stored double.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotANumber` for NaN or infinite values and
    /// `PriceError::NotPositive` for amounts that are zero or negative.
    pub fn from_f64(amount: f64) -> Result<Self, PriceError> {
        let decimal = Decimal::try_from(amount).map_err(|_| PriceError::NotANumber)?;
        Self::new(decimal.normalize())
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount as a double, the representation used in storage.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.as_f64()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
