//! Trolley
//!
//! Trolley is an in-memory shopping cart for a pharmacy storefront: a product
//! catalog loaded from YAML, a cart that tracks quantities and totals, and a
//! checkout receipt with tax.
//!
//! ```
//! use rusty_money::{Money, iso};
//! use trolley::prelude::*;
//!
//! # fn main() -> Result<(), ProductError> {
//! let aspirin = Product::new(ProductId::new("A")?, "Aspirin", Price::new(80_99))?;
//!
//! let mut cart = Cart::new(iso::INR);
//! cart.add(aspirin.clone());
//! cart.add(aspirin);
//!
//! assert_eq!(cart.quantity("A"), 2);
//! assert_eq!(cart.total(), Money::from_minor(161_98, iso::INR));
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod items;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod utils;
