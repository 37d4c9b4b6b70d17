//! Utils

use std::path::{Path, PathBuf};

use clap::Parser;

/// Catalog used when neither the arguments nor the config name one
pub const DEFAULT_CATALOG: &str = "fixtures/catalog/pharmacy.yml";

/// Arguments for the cart example
#[derive(Debug, Parser)]
#[command(name = "cart", about = "Fill a cart from a catalog and print the receipt", long_about = None)]
pub struct ExampleCartArgs {
    /// Store config file (currency, tax rate, catalog)
    #[arg(short, long, env = "TROLLEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog file; overrides the catalog named in the config
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Product id to add; repeat to add more units
    #[arg(short, long = "add")]
    pub add: Vec<String>,

    /// Add one unit of every product whose name matches
    #[arg(short, long)]
    pub search: Option<String>,

    /// Check out once the receipt has been printed
    #[arg(long)]
    pub checkout: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl ExampleCartArgs {
    /// Resolve which catalog file to load
    pub fn catalog_path(&self, configured: Option<&Path>) -> PathBuf {
        self.catalog
            .clone()
            .or_else(|| configured.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
    }
}
