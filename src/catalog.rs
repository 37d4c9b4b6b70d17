//! Catalog
//!
//! A catalog is the point where product data enters the system. Records are
//! read from YAML and validated here, so everything handed on to a
//! [`Cart`] is a well-formed [`Product`] priced in the catalog currency.
//!
//! ```yaml
//! products:
//!   - id: "1"
//!     name: Low Dose Aspirin Enteric Safety-Coated
//!     description: For heart health maintenance.
//!     precautions: Do not use if allergic to aspirin.
//!     essential: true
//!     price: 80.99 INR
//! ```

use std::{fs, io, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;
use slotmap::{SlotMap, basic::Values, new_key_type};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::Cart,
    prices::{Price, currency_from_code},
    products::{Product, ProductError, ProductId},
};

new_key_type! {
    /// Catalog Entry Key
    pub struct ProductKey;
}

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Prices must not be negative
    #[error("Negative price: {0}")]
    NegativePrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// The same product id appears more than once
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Product record failed validation
    #[error(transparent)]
    Product(#[from] ProductError),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: String,
    name: String,
    price: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    precautions: Option<String>,
    #[serde(default)]
    essential: bool,
}

/// A product together with the storefront details shown alongside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    product: Product,
    description: Option<String>,
    precautions: Option<String>,
    essential: bool,
}

impl CatalogEntry {
    /// The product as offered to a cart
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Short description of what the product is for
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Usage warnings
    pub fn precautions(&self) -> Option<&str> {
        self.precautions.as_deref()
    }

    /// Whether the product is flagged as an essential medicine
    pub fn is_essential(&self) -> bool {
        self.essential
    }
}

/// Product catalog
#[derive(Debug, Default)]
pub struct Catalog {
    /// Entries are never removed, so slot order is load order
    entries: SlotMap<ProductKey, CatalogEntry>,

    /// Product id -> slot key
    keys: FxHashMap<ProductId, ProductKey>,

    /// Currency shared by every product
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a YAML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or any record is invalid.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        catalog.extend_from_yaml(contents)?;

        Ok(catalog)
    }

    /// Load a catalog from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or any record is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let catalog = Self::from_yaml(&contents)?;

        info!(path = %path.display(), products = catalog.len(), "loaded catalog");

        Ok(catalog)
    }

    /// Add every record in a YAML document to the catalog
    ///
    /// Records are validated in order; on error, records before the failing
    /// one remain in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or any record is invalid.
    pub fn extend_from_yaml(&mut self, contents: &str) -> Result<&mut Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(contents)?;

        for record in file.products {
            self.insert_record(record)?;
        }

        Ok(self)
    }

    fn insert_record(&mut self, record: ProductRecord) -> Result<ProductKey, CatalogError> {
        let (price, currency) = parse_price(&record.price)?;

        if let Some(existing) = self.currency.filter(|existing| *existing != currency) {
            return Err(CatalogError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            ));
        }

        let id = ProductId::new(record.id)?;

        if self.keys.contains_key(&id) {
            return Err(CatalogError::DuplicateProduct(id.to_string()));
        }

        let product = Product::new(id.clone(), record.name, price)?;

        debug!(product_id = %id, price = *price, "catalog product");

        // Only a stored product fixes the catalog currency
        self.currency = Some(currency);

        let key = self.entries.insert(CatalogEntry {
            product,
            description: record.description,
            precautions: record.precautions,
            essential: record.essential,
        });

        self.keys.insert(id, key);

        Ok(key)
    }

    /// Get a product by its id
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.entry(id).map(CatalogEntry::product)
    }

    /// Get a catalog entry by its product id
    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        let key = self.keys.get(id)?;

        self.entries.get(*key)
    }

    /// Iterate over entries in load order
    pub fn iter(&self) -> Values<'_, ProductKey, CatalogEntry> {
        self.entries.values()
    }

    /// Find entries whose name contains the search term, ignoring case
    ///
    /// A blank term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&CatalogEntry> {
        let needle = term.trim().to_lowercase();

        if needle.is_empty() {
            return Vec::new();
        }

        self.iter()
            .filter(|entry| entry.product.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currency every product is priced in, once a product has been loaded
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Create an empty cart priced in the catalog currency
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoCurrency`] if no products have been loaded.
    pub fn new_cart(&self) -> Result<Cart, CatalogError> {
        let currency = self.currency.ok_or(CatalogError::NoCurrency)?;

        Ok(Cart::new(currency))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = Values<'a, ProductKey, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Parse price string (e.g., "80.99 INR") into a price and its currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if
/// the amount is not a decimal number, is negative, or has more decimal places
/// than the currency allows, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(Price, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CatalogError::NegativePrice(s.to_string()));
    }

    let currency = currency_from_code(currency_code)
        .ok_or_else(|| CatalogError::UnknownCurrency((*currency_code).to_string()))?;

    if amount.normalize().scale() > currency.exponent {
        return Err(CatalogError::InvalidPrice(format!(
            "{s} has more than {} decimal places",
            currency.exponent
        )));
    }

    let minor_units = 10_u64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.trunc().to_u64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((Price::new(minor_units), currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, INR};
    use testresult::TestResult;

    use super::*;

    const PHARMACY: &str = r#"
products:
  - id: "1"
    name: Low Dose Aspirin Enteric Safety-Coated
    description: For heart health maintenance.
    precautions: Do not use if allergic to aspirin.
    essential: true
    price: 80.99 INR
  - id: "2"
    name: Ibuprofen Tablets (200mg)
    price: 75.99 INR
  - id: "3"
    name: Allergy Relief Antihistamines
    price: 124.50 INR
"#;

    #[test]
    fn parse_price_reads_minor_units() -> TestResult {
        let (price, currency) = parse_price("80.99 INR")?;

        assert_eq!(price, Price::new(80_99));
        assert_eq!(currency, INR);

        Ok(())
    }

    #[test]
    fn parse_price_accepts_whole_amounts() -> TestResult {
        let (price, currency) = parse_price("5 GBP")?;

        assert_eq!(price, Price::new(5_00));
        assert_eq!(currency, GBP);

        Ok(())
    }

    #[test]
    fn parse_price_accepts_trailing_zeros() -> TestResult {
        let (price, _) = parse_price("124.500 INR")?;

        assert_eq!(price, Price::new(124_50));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99INR");

        assert!(matches!(result, Err(CatalogError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        let result = parse_price("-1.00 INR");

        assert!(matches!(result, Err(CatalogError::NegativePrice(_))));
    }

    #[test]
    fn parse_price_rejects_fractional_minor_units() {
        let result = parse_price("1.005 INR");

        assert!(matches!(result, Err(CatalogError::InvalidPrice(_))));
    }

    #[test]
    fn from_yaml_keeps_file_order() -> TestResult {
        let catalog = Catalog::from_yaml(PHARMACY)?;

        let ids: Vec<&str> = catalog
            .iter()
            .map(|entry| entry.product().id().as_str())
            .collect();

        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(catalog.currency(), Some(INR));

        Ok(())
    }

    #[test]
    fn entry_exposes_storefront_details() -> TestResult {
        let catalog = Catalog::from_yaml(PHARMACY)?;

        let entry = catalog.entry("1").ok_or("missing entry")?;

        assert_eq!(entry.description(), Some("For heart health maintenance."));
        assert!(entry.is_essential());
        assert_eq!(catalog.entry("2").map(CatalogEntry::precautions), Some(None));
        assert!(catalog.product("404").is_none());
        assert!(catalog.product("").is_none());

        Ok(())
    }

    #[test]
    fn from_yaml_rejects_mixed_currencies() {
        let yaml = r#"
products:
  - id: "1"
    name: Aspirin
    price: 80.99 INR
  - id: "2"
    name: Ibuprofen
    price: 2.99 GBP
"#;

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(
            result,
            Err(CatalogError::CurrencyMismatch(expected, found)) if expected == "INR" && found == "GBP"
        ));
    }

    #[test]
    fn from_yaml_rejects_duplicate_ids() {
        let yaml = r#"
products:
  - id: "1"
    name: Aspirin
    price: 80.99 INR
  - id: "1"
    name: Aspirin Again
    price: 80.99 INR
"#;

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(result, Err(CatalogError::DuplicateProduct(id)) if id == "1"));
    }

    #[test]
    fn from_yaml_rejects_blank_names() {
        let yaml = r#"
products:
  - id: "1"
    name: ""
    price: 80.99 INR
"#;

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(
            result,
            Err(CatalogError::Product(ProductError::EmptyName(_)))
        ));
    }

    #[test]
    fn from_yaml_rejects_missing_fields() {
        let yaml = r#"
products:
  - id: "1"
    name: Aspirin
"#;

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(result, Err(CatalogError::Yaml(_))));
    }

    #[test]
    fn extend_from_yaml_appends_to_existing_products() -> TestResult {
        let mut catalog = Catalog::from_yaml(PHARMACY)?;

        catalog.extend_from_yaml(
            r#"
products:
  - id: "4"
    name: Antacid Chewable Tablets
    price: 57.99 INR
"#,
        )?;

        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.product("4").map(Product::price),
            Some(Price::new(57_99))
        );

        Ok(())
    }

    #[test]
    fn extend_from_yaml_failed_record_leaves_empty_catalog_untouched() -> TestResult {
        let mut catalog = Catalog::new();

        let result = catalog.extend_from_yaml(
            r#"
products:
  - id: ""
    name: Aspirin
    price: 80.99 INR
"#,
        );

        assert!(matches!(
            result,
            Err(CatalogError::Product(ProductError::EmptyId))
        ));
        assert!(catalog.is_empty());
        assert_eq!(catalog.currency(), None);
        assert!(matches!(catalog.new_cart(), Err(CatalogError::NoCurrency)));

        catalog.extend_from_yaml(
            r#"
products:
  - id: "1"
    name: Paracetamol
    price: 2.99 GBP
"#,
        )?;

        assert_eq!(catalog.currency(), Some(GBP));
        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn extend_from_yaml_keeps_records_before_the_failure() {
        let mut catalog = Catalog::new();

        let result = catalog.extend_from_yaml(
            r#"
products:
  - id: "1"
    name: Aspirin
    price: 80.99 INR
  - id: "2"
    name: " "
    price: 75.99 INR
"#,
        );

        assert!(matches!(
            result,
            Err(CatalogError::Product(ProductError::EmptyName(_)))
        ));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.product("2").is_none());
        assert_eq!(catalog.currency(), Some(INR));
    }

    #[test]
    fn search_ignores_case_and_whitespace() -> TestResult {
        let catalog = Catalog::from_yaml(PHARMACY)?;

        let names: Vec<&str> = catalog
            .search("  IBUPROFEN ")
            .into_iter()
            .map(|entry| entry.product().name())
            .collect();

        assert_eq!(names, ["Ibuprofen Tablets (200mg)"]);

        Ok(())
    }

    #[test]
    fn search_blank_term_matches_nothing() -> TestResult {
        let catalog = Catalog::from_yaml(PHARMACY)?;

        assert!(catalog.search("   ").is_empty());

        Ok(())
    }

    #[test]
    fn new_cart_uses_catalog_currency() -> TestResult {
        let catalog = Catalog::from_yaml(PHARMACY)?;

        let cart = catalog.new_cart()?;

        assert_eq!(cart.currency(), INR);

        Ok(())
    }

    #[test]
    fn new_cart_without_products_errors() {
        let catalog = Catalog::new();

        assert!(matches!(catalog.new_cart(), Err(CatalogError::NoCurrency)));
    }
}
