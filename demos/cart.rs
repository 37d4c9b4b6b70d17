//! Cart Example
//!
//! Fills a cart from a product catalog and prints the receipt.
//!
//! Use `-c` to load a store config (currency, tax rate, catalog)
//! Use `-a` to add a product by id; repeat it to add more units
//! Use `-s` to add one unit of every product whose name matches
//! Use `--checkout` to check the cart out and print the final receipt

use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trolley::{catalog::Catalog, config::StoreConfig, receipt::Receipt, utils::ExampleCartArgs};

/// Cart Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = ExampleCartArgs::parse();

    init_logging(&args.log_level)?;

    let config = match args.config.as_deref() {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };

    let catalog = Catalog::load(args.catalog_path(config.catalog()))?;
    let mut cart = catalog.new_cart()?;

    if cart.currency() != config.currency() {
        bail!(
            "catalog is priced in {}, but the store is configured for {}",
            cart.currency().iso_alpha_code,
            config.currency().iso_alpha_code
        );
    }

    for id in &args.add {
        match catalog.product(id) {
            Some(product) => cart.add(product.clone()),
            None => warn!(product_id = %id, "unknown product, skipping"),
        }
    }

    if let Some(term) = args.search.as_deref() {
        for entry in catalog.search(term) {
            cart.add(entry.product().clone());
        }
    }

    if cart.is_empty() {
        println!("Your cart is currently empty.");
        return Ok(());
    }

    if args.checkout {
        let receipt = cart.checkout(config.tax_rate())?;

        receipt.write_to(io::stdout().lock())?;

        println!(
            "\nCheckout complete: {} units, order total {}",
            receipt.unit_count(),
            receipt.total()
        );
    } else {
        Receipt::from_cart(&cart, config.tax_rate())?.write_to(io::stdout().lock())?;
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}
