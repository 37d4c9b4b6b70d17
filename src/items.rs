//! Items

use std::num::NonZeroU32;

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

/// A product held in the cart, with the number of units held
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    product: Product,
    quantity: NonZeroU32,
}

impl LineItem {
    /// Creates a line item holding a single unit of the product
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Creates a line item holding the given number of units
    pub fn with_quantity(product: Product, quantity: NonZeroU32) -> Self {
        Self { product, quantity }
    }

    /// Returns the product id
    pub fn id(&self) -> &ProductId {
        self.product.id()
    }

    /// Returns the product display name
    pub fn name(&self) -> &str {
        self.product.name()
    }

    /// Returns the price of a single unit
    pub fn unit_price(&self) -> Price {
        self.product.price()
    }

    /// Returns the product
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the number of units held
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Returns `unit_price × quantity`, saturating on overflow
    pub fn line_total(&self) -> Price {
        self.unit_price().saturating_mul(self.quantity())
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}

/// Returns the line item for the given product id
pub fn find_item<'a>(items: &'a [LineItem], id: &str) -> Option<&'a LineItem> {
    items.iter().find(|item| item.id().as_str() == id)
}
