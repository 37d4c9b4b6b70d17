//! Cart
//!
//! The cart is the single source of truth for what a shopper is buying in the
//! current session. It is an owned value: whoever needs to mutate it is handed
//! `&mut Cart`, there is no process-wide instance.
//!
//! Every operation is total. Asking about, removing or re-quantifying a product
//! that is not in the cart is a no-op rather than an error.

use std::num::NonZeroU32;

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use tracing::{debug, info};

use crate::{
    items::{LineItem, find_item},
    pricing::total_price,
    products::Product,
    receipt::{Receipt, ReceiptError},
};

/// In-memory shopping cart
///
/// Rows keep the order in which products were first added and each product id
/// appears at most once. Every row holds at least one unit.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart priced in the given currency
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of a product
    ///
    /// If the product is already in the cart its quantity goes up by one,
    /// otherwise a new row with a quantity of one is appended.
    pub fn add(&mut self, product: Product) {
        if let Some(item) = self.find_mut(product.id().as_str()) {
            item.increment();

            debug!(product_id = %item.id(), quantity = item.quantity(), "incremented cart item");

            return;
        }

        debug!(product_id = %product.id(), quantity = 1, "added cart item");

        self.items.push(LineItem::new(product));
    }

    /// Remove the row for a product, if present
    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();

        self.items.retain(|item| item.id().as_str() != id);

        if self.items.len() != before {
            debug!(product_id = id, "removed cart item");
        }
    }

    /// Replace the quantity held for a product
    ///
    /// A quantity of zero or less removes the row. Products that are not in
    /// the cart are never created by this call. Quantities above `u32::MAX`
    /// are clamped.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) {
        let Some(quantity) = positive_quantity(quantity) else {
            self.remove(id);
            return;
        };

        if let Some(item) = self.find_mut(id) {
            item.set_quantity(quantity);

            debug!(product_id = id, quantity = quantity.get(), "set cart item quantity");
        }
    }

    /// Add one unit of a product that is already in the cart
    pub fn increment(&mut self, id: &str) {
        let Some(current) = self.get(id).map(LineItem::quantity) else {
            return;
        };

        self.set_quantity(id, i64::from(current) + 1);
    }

    /// Take one unit of a product out of the cart
    ///
    /// The row is removed once its quantity reaches zero.
    pub fn decrement(&mut self, id: &str) {
        let Some(current) = self.get(id).map(LineItem::quantity) else {
            return;
        };

        self.set_quantity(id, i64::from(current) - 1);
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        debug!(rows = self.items.len(), "cleared cart");

        self.items.clear();
    }

    /// Sum of `unit price × quantity` over every row, in the cart currency
    pub fn total(&self) -> Money<'static, Currency> {
        total_price(&self.items).to_money(self.currency)
    }

    /// Number of units held for a product, or zero if it is not in the cart
    pub fn quantity(&self, id: &str) -> u32 {
        self.get(id).map_or(0, LineItem::quantity)
    }

    /// Get the row for a product
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        find_item(&self.items, id)
    }

    /// Get the rows, in the order they were first added
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the rows
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get the number of rows in the cart
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of units across every row
    pub fn unit_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity()))
            .sum()
    }

    /// Get the currency of the cart
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Check out the cart, producing a receipt with tax applied at `tax_rate`
    ///
    /// The cart is cleared once the receipt has been built.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::EmptyCart`] if there is nothing to check out, or
    /// a money error if the totals cannot be computed. The cart is left
    /// untouched on error.
    pub fn checkout(&mut self, tax_rate: Percentage) -> Result<Receipt, ReceiptError> {
        let receipt = Receipt::from_cart(self, tax_rate)?;

        info!(
            rows = self.items.len(),
            units = self.unit_count(),
            total = %receipt.total(),
            "checked out cart"
        );

        self.items.clear();

        Ok(receipt)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id().as_str() == id)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn positive_quantity(quantity: i64) -> Option<NonZeroU32> {
    if quantity <= 0 {
        return None;
    }

    NonZeroU32::new(u32::try_from(quantity).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{
        prices::Price,
        products::{ProductError, ProductId},
    };

    use super::*;

    fn product(id: &str, name: &str, minor: u64) -> Result<Product, ProductError> {
        Product::new(ProductId::new(id)?, name, Price::new(minor))
    }

    fn aspirin() -> Result<Product, ProductError> {
        product("A", "Aspirin", 80_99)
    }

    fn ibuprofen() -> Result<Product, ProductError> {
        product("B", "Ibuprofen", 75_99)
    }

    #[test]
    fn new_with_currency() {
        let cart = Cart::new(iso::INR);

        assert_eq!(cart.currency(), iso::INR);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::from_minor(0, iso::INR));
    }

    #[test]
    fn repeated_adds_increment_a_single_row() -> TestResult {
        let mut cart = Cart::new(iso::INR);

        for _ in 0..4 {
            cart.add(aspirin()?);
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity("A"), 4);

        Ok(())
    }

    #[test]
    fn adds_and_totals() -> TestResult {
        let mut cart = Cart::new(iso::INR);

        cart.add(aspirin()?);
        cart.add(aspirin()?);
        cart.add(ibuprofen()?);

        assert_eq!(cart.quantity("A"), 2);
        assert_eq!(cart.quantity("B"), 1);
        assert_eq!(cart.total(), Money::from_minor(237_97, iso::INR));

        cart.set_quantity("A", 5);

        assert_eq!(cart.total(), Money::from_minor(480_94, iso::INR));

        Ok(())
    }

    #[test]
    fn rows_keep_insertion_order() -> TestResult {
        let mut cart = Cart::new(iso::INR);

        cart.add(ibuprofen()?);
        cart.add(aspirin()?);
        cart.add(ibuprofen()?);

        let ids: Vec<&str> = cart.iter().map(|item| item.id().as_str()).collect();

        assert_eq!(ids, ["B", "A"]);

        Ok(())
    }

    #[test]
    fn remove_missing_is_noop() -> TestResult {
        let mut cart = Cart::new(iso::INR);
        cart.add(aspirin()?);

        cart.remove("missing");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity("A"), 1);

        Ok(())
    }

    #[test]
    fn remove_drops_row() -> TestResult {
        let mut cart = Cart::new(iso::INR);
        cart.add(aspirin()?);
        cart.add(ibuprofen()?);

        cart.remove("A");

        assert_eq!(cart.quantity("A"), 0);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Money::from_minor(75_99, iso::INR));

        Ok(())
    }

    #[test]
    fn set_quantity_non_positive_removes() -> TestResult {
        let mut cart = Cart::new(iso::INR);
        cart.add(aspirin()?);
        cart.add(ibuprofen()?);

        cart.set_quantity("A", 0);
        cart.set_quantity("B", -3);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_does_not_create_rows() {
        let mut cart = Cart::new(iso::INR);

        cart.set_quantity("A", 3);

        assert!(cart.is_empty());
        assert_eq!(cart.quantity("A"), 0);
    }

    #[test]
    fn set_quantity_clamps_to_u32() -> TestResult {
        let mut cart = Cart::new(iso::INR);
        cart.add(aspirin()?);

        cart.set_quantity("A", i64::MAX);

        assert_eq!(cart.quantity("A"), u32::MAX);

        Ok(())
    }

    #[test]
    fn increment_and_decrement_step_by_one() -> TestResult {
        let mut cart = Cart::new(iso::INR);
        cart.add(aspirin()?);

        cart.increment("A");
        cart.increment("A");
        assert_eq!(cart.quantity("A"), 3);

        cart.decrement("A");
        assert_eq!(cart.quantity("A"), 2);

        cart.decrement("A");
        cart.decrement("A");
        assert!(cart.is_empty());

        cart.increment("A");
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn clear_empties_cart() -> TestResult {
        let mut cart = Cart::new(iso::INR);
        cart.add(aspirin()?);
        cart.add(ibuprofen()?);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::from_minor(0, iso::INR));
        assert_eq!(cart.quantity("A"), 0);

        Ok(())
    }

    #[test]
    fn unit_count_sums_quantities() -> TestResult {
        let mut cart = Cart::new(iso::INR);
        cart.add(aspirin()?);
        cart.add(aspirin()?);
        cart.add(ibuprofen()?);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.unit_count(), 3);

        Ok(())
    }

    #[test]
    fn checkout_clears_cart() -> TestResult {
        let mut cart = Cart::new(iso::INR);
        cart.add(aspirin()?);
        cart.add(aspirin()?);
        cart.add(ibuprofen()?);

        let receipt = cart.checkout(Percentage::from(0.08))?;

        assert_eq!(receipt.subtotal(), Money::from_minor(237_97, iso::INR));
        assert_eq!(receipt.total(), Money::from_minor(257_01, iso::INR));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn checkout_empty_cart_errors() {
        let mut cart = Cart::new(iso::INR);

        let result = cart.checkout(Percentage::from(0.08));

        assert!(matches!(result, Err(ReceiptError::EmptyCart)));
    }
}
