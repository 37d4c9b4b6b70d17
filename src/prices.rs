//! Prices

use std::ops::Deref;

use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, INR, USD},
};

/// Represents a non-negative price in minor units (paise, pence, cents)
///
/// Prices carry no currency of their own; the owning cart or catalog decides
/// which currency the minor units are counted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A price of nothing
    pub const ZERO: Price = Price { value: 0 };

    /// Creates a new Price
    pub fn new(value: u64) -> Self {
        Price { value }
    }

    /// Multiplies the price by a quantity, returning `None` on overflow
    pub fn checked_mul(self, quantity: u32) -> Option<Price> {
        self.value.checked_mul(u64::from(quantity)).map(Price::new)
    }

    /// Multiplies the price by a quantity, saturating at `u64::MAX` minor units
    pub fn saturating_mul(self, quantity: u32) -> Price {
        Price::new(self.value.saturating_mul(u64::from(quantity)))
    }

    /// Adds two prices, saturating at `u64::MAX` minor units
    pub fn saturating_add(self, other: Price) -> Price {
        Price::new(self.value.saturating_add(other.value))
    }

    /// Converts the price into money of the given currency
    ///
    /// Amounts beyond `i64::MAX` minor units are clamped.
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        let minor = i64::try_from(self.value).unwrap_or(i64::MAX);

        Money::from_minor(minor, currency)
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::new(value)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

/// Looks up a supported currency by its ISO alpha code
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code.trim() {
        "INR" => Some(INR),
        "GBP" => Some(GBP),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        _ => None,
    }
}
