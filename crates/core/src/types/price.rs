//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as integer minor units (kopecks) and handled as
//! [`Decimal`] amounts in the major unit everywhere else, so cart totals never
//! touch floating point.

use std::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of minor units per major unit (kopecks per rouble).
const MINOR_UNIT_SCALE: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., roubles, not kopecks).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a rouble price from an amount in kopecks.
    #[must_use]
    pub fn from_minor_units(minor: i64) -> Self {
        Self::new(Decimal::new(minor, MINOR_UNIT_SCALE), CurrencyCode::RUB)
    }

    /// A zero rouble price.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::RUB)
    }

    /// Price of `quantity` units at this price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, p| {
            Self::new(acc.amount + p.amount, acc.currency_code)
        })
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    RUB,
}
