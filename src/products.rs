//! Products

use std::{borrow::Borrow, fmt};

use thiserror::Error;

use crate::prices::Price;

/// Errors raised when product data fails validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// The product id was empty or only whitespace
    #[error("product id must not be empty")]
    EmptyId,

    /// The product name was empty or only whitespace
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// Stable identifier of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::EmptyId`] if the id is empty or only whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ProductError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(ProductError::EmptyId);
        }

        Ok(Self(id))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ProductId {
    type Error = ProductError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

/// Product, as offered to the cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
}

impl Product {
    /// Creates a new product
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::EmptyName`] if the name is empty or only whitespace.
    pub fn new(id: ProductId, name: impl Into<String>, price: Price) -> Result<Self, ProductError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(ProductError::EmptyName(id));
        }

        Ok(Self { id, name, price })
    }

    /// Product id
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Product display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price per unit
    pub fn price(&self) -> Price {
        self.price
    }
}
