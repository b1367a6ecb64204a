//! Bundled default catalog
//!
//! Shipped with the binary and used whenever no catalog snapshot has been
//! persisted yet. Also the reference the rehydration merge reconciles against.

use crate::error::{AppError, AppResult};
use crate::models::Product;

const DEFAULT_CATALOG_JSON: &str = include_str!("../data/default_catalog.json");

/// Parse the bundled catalog
pub fn default_catalog() -> AppResult<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_str(DEFAULT_CATALOG_JSON)
        .map_err(|e| AppError::internal(format!("bundled catalog is invalid: {}", e)))?;
    tracing::debug!(count = products.len(), "Parsed bundled catalog");
    Ok(products)
}
