//! Cart line item model

use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::money;

/// Identity of a line item: one product in one variant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartKey {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

impl CartKey {
    pub fn new(
        product_id: impl Into<String>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// One cart entry
///
/// `product` is a snapshot taken when the item was first added; later catalog
/// edits do not flow into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn key(&self) -> CartKey {
        CartKey::new(&self.product.id, &self.size, &self.color)
    }

    pub fn matches(&self, product_id: &str, size: &str, color: &str) -> bool {
        self.product.id == product_id && self.size == size && self.color == color
    }

    /// `quantity × product.price` using the snapshotted base price
    pub fn line_total(&self) -> f64 {
        money::line_total(self.product.price, self.quantity)
    }
}
