//! Store configuration
//!
//! ```yaml
//! currency: INR
//! tax_rate: 8%
//! catalog: fixtures/catalog/pharmacy.yml
//! ```
//!
//! Every field is optional.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use decimal_percentage::Percentage;
use rusty_money::iso::{Currency, INR};
use serde::Deserialize;
use thiserror::Error;

use crate::prices::currency_from_code;

/// Tax rate applied at checkout when none is configured
pub const DEFAULT_TAX_RATE: f64 = 0.08;

/// Configuration Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    currency: Option<String>,
    tax_rate: Option<String>,
    catalog: Option<PathBuf>,
}

/// Settings for a storefront session
#[derive(Debug, Clone)]
pub struct StoreConfig {
    currency: &'static Currency,
    tax_rate: Percentage,
    catalog: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: INR,
            tax_rate: Percentage::from(DEFAULT_TAX_RATE),
            catalog: None,
        }
    }
}

impl StoreConfig {
    /// Parse configuration from a YAML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed, names an unknown
    /// currency, or has an invalid tax rate.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_norway::from_str(contents)?
        };

        let mut config = Self::default();

        if let Some(code) = file.currency {
            config.currency =
                currency_from_code(&code).ok_or(ConfigError::UnknownCurrency(code))?;
        }

        if let Some(rate) = file.tax_rate {
            config.tax_rate = parse_percentage(&rate)?;
        }

        config.catalog = file.catalog;

        Ok(config)
    }

    /// Load configuration from a YAML file
    ///
    /// A relative catalog path is resolved against the directory holding the
    /// config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut config = Self::from_yaml(&contents)?;

        config.catalog = config.catalog.map(|catalog| match path.parent() {
            Some(dir) if catalog.is_relative() => dir.join(catalog),
            _ => catalog,
        });

        Ok(config)
    }

    /// Use a different catalog file
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<PathBuf>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Currency new carts are priced in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Tax rate applied at checkout
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }

    /// Catalog file to load products from
    pub fn catalog(&self) -> Option<&Path> {
        self.catalog.as_deref()
    }
}

/// Parse percentage string (e.g., "8%" or "0.08") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "8%" for 8%
/// - Decimal format: "0.08" for 8%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed, or if the value is
/// negative or not finite.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<f64>()
            .map(|value| value / 100.0)
    } else {
        trimmed.parse::<f64>()
    }
    .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}
