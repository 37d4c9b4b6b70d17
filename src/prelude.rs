//! Trolley prelude
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogEntry, CatalogError, ProductKey},
    config::{ConfigError, StoreConfig},
    items::LineItem,
    prices::Price,
    pricing::total_price,
    products::{Product, ProductError, ProductId},
    receipt::{Receipt, ReceiptError, ReceiptLine},
};
