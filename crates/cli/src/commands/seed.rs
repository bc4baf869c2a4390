//! Seed the products collection from a YAML catalog.
//!
//! The catalog is parsed and every product validated before the database is
//! touched, so a bad file never leaves the collection half-replaced.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use shopfront_api::db::ProductRepository;
use shopfront_api::models::NewProduct;
use shopfront_core::ProductInput;

/// Starter catalog bundled with the binary.
const BUNDLED_CATALOG: &str = include_str!("../../seed/products.yaml");

/// Catalog file layout.
#[derive(Debug, Deserialize)]
struct Catalog {
    products: Vec<ProductInput>,
}

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("catalog contains no products")]
    Empty,
    #[error("{0} invalid products in catalog")]
    Invalid(usize),
}

/// Parse a catalog and validate every product in it.
///
/// Validation messages are logged per product, with its position and name.
///
/// # Errors
///
/// Returns `CatalogError` if the YAML is malformed, empty or has invalid products.
pub fn parse_catalog(content: &str) -> Result<Vec<NewProduct>, CatalogError> {
    let catalog: Catalog = serde_yaml::from_str(content)?;
    if catalog.products.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut products = Vec::with_capacity(catalog.products.len());
    let mut invalid = 0;

    for (position, input) in catalog.products.into_iter().enumerate() {
        let label = input.name.clone().unwrap_or_else(|| "<unnamed>".to_string());
        match NewProduct::from_input(input) {
            Ok(product) => products.push(product),
            Err(errors) => {
                invalid += 1;
                error!("Product #{} ({label}) is invalid:", position + 1);
                for err in &errors {
                    error!("  - {err}");
                }
            }
        }
    }

    if invalid > 0 {
        return Err(CatalogError::Invalid(invalid));
    }
    Ok(products)
}

/// Seed products from a catalog file, or the bundled catalog.
///
/// # Arguments
///
/// * `file_path` - Path to a YAML catalog; `None` uses the bundled one
/// * `keep_existing` - If false, existing products are deleted first
///
/// # Errors
///
/// Returns an error if the file cannot be read, the catalog is invalid,
/// or database operations fail.
pub async fn products(
    file_path: Option<&str>,
    keep_existing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Read and validate the catalog before connecting to the database
    let content = match file_path {
        Some(file_path) => {
            let path = Path::new(file_path);
            if !path.exists() {
                return Err(format!("File not found: {file_path}").into());
            }
            info!(path = %file_path, "Loading catalog from file");
            tokio::fs::read_to_string(path).await?
        }
        None => {
            info!("Loading bundled starter catalog");
            BUNDLED_CATALOG.to_string()
        }
    };

    let catalog = parse_catalog(&content)?;
    info!(products = catalog.len(), "Catalog validated successfully");

    let store = super::connect().await?;
    let repo = ProductRepository::new(&store);

    if !keep_existing {
        let removed = repo.clear().await?;
        info!(removed, "Cleared existing products");
    }

    for product in &catalog {
        let id = repo.create(product).await?;
        info!("  - {} ({}) [{id}]", product.name, product.price);
    }

    info!("Seeding complete!");
    info!("  Products inserted: {}", catalog.len());

    Ok(())
}
