//! Pricing

use crate::{items::LineItem, prices::Price};

/// Calculates the total price of a list of line items
///
/// The sum saturates at `u64::MAX` minor units rather than overflowing. An
/// empty list totals [`Price::ZERO`].
pub fn total_price(items: &[LineItem]) -> Price {
    items
        .iter()
        .fold(Price::ZERO, |acc, item| acc.saturating_add(item.line_total()))
}
