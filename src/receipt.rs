//! Receipt

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{cart::Cart, items::LineItem, pricing::total_price};

/// Errors that can occur when building or printing a receipt
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// There is nothing in the cart to check out
    #[error("cart is empty")]
    EmptyCart,

    /// Tax calculation could not be safely converted
    #[error("tax percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapper for money errors
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error while printing
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// One row of a receipt
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    name: String,
    unit_price: Money<'static, Currency>,
    quantity: u32,
    line_total: Money<'static, Currency>,
}

impl ReceiptLine {
    fn from_item(item: &LineItem, currency: &'static Currency) -> Self {
        Self {
            name: item.name().to_string(),
            unit_price: item.unit_price().to_money(currency),
            quantity: item.quantity(),
            line_total: item.line_total().to_money(currency),
        }
    }

    /// Product display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// Units purchased
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit price × quantity`
    pub fn line_total(&self) -> Money<'static, Currency> {
        self.line_total
    }
}

/// Checkout summary for a cart
#[derive(Debug, Clone)]
pub struct Receipt {
    /// Rows in cart order
    lines: SmallVec<[ReceiptLine; 8]>,

    /// Total cost before tax
    subtotal: Money<'static, Currency>,

    /// Tax charged on the subtotal
    tax: Money<'static, Currency>,

    /// Amount payable
    total: Money<'static, Currency>,

    tax_rate: Percentage,

    currency: &'static Currency,
}

impl Receipt {
    /// Build a receipt for the current contents of a cart
    ///
    /// Tax is the subtotal multiplied by `tax_rate`, rounded half away from
    /// zero to whole minor units.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::EmptyCart`]: the cart has no rows.
    /// - [`ReceiptError::PercentConversion`]: the tax could not be represented.
    /// - [`ReceiptError::Money`]: money arithmetic failed.
    pub fn from_cart(cart: &Cart, tax_rate: Percentage) -> Result<Self, ReceiptError> {
        if cart.is_empty() {
            return Err(ReceiptError::EmptyCart);
        }

        let currency = cart.currency();

        let lines = cart
            .iter()
            .map(|item| ReceiptLine::from_item(item, currency))
            .collect();

        let subtotal = total_price(cart.items()).to_money(currency);
        let tax_minor = percent_of_minor(tax_rate, subtotal.to_minor_units())?;
        let tax = Money::from_minor(tax_minor, currency);
        let total = subtotal.add(tax)?;

        Ok(Self {
            lines,
            subtotal,
            tax,
            total,
            tax_rate,
            currency,
        })
    }

    /// Rows in cart order
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Total cost before tax
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Tax charged on the subtotal
    pub fn tax(&self) -> Money<'static, Currency> {
        self.tax
    }

    /// Amount payable
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Rate the tax was charged at
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// Currency used for all monetary values
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of units across every row
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Prints the receipt as a table followed by the totals
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Unit Price", "Qty", "Line Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.unit_price.to_string(),
                line.quantity.to_string(),
                line.line_total.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let tax_points = (self.tax_rate * Decimal::ONE_HUNDRED)
            .round_dp(2)
            .normalize();

        let rows = [
            ("Subtotal:".to_string(), self.subtotal.to_string()),
            (format!("Tax ({tax_points}%):"), self.tax.to_string()),
            ("Total:".to_string(), self.total.to_string()),
        ];

        let label_width = rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or_default();

        let value_width = rows
            .iter()
            .map(|(_, value)| value.chars().count())
            .max()
            .unwrap_or_default();

        for (label, value) in rows {
            writeln!(out, " {label:<label_width$}  {value:>value_width$}")?;
        }

        Ok(())
    }
}

/// Calculate a percentage of a minor unit amount, rounded half away from zero
fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, ReceiptError> {
    let minor = Decimal::from_i64(minor).ok_or(ReceiptError::PercentConversion)?;

    (percent * Decimal::ONE) // decimal_percentage does not expose the inner Decimal
        .checked_mul(minor)
        .ok_or(ReceiptError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(ReceiptError::PercentConversion)
}
