//! Product Model

use serde::{Deserialize, Serialize};

use super::stock::StockTable;
use crate::money;
use crate::util;

/// Color variant (`name` is the stock key, `hex` is the swatch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub hex: String,
}

impl ColorOption {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// Descriptive metadata, no behavioral effect
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Discount percentage (0-100); `None` or 0 means no discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// First image is the primary one
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    #[serde(default)]
    pub featured: bool,
    /// Derived from `stock` when a table exists, manual flag otherwise
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<StockTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ProductDetails>,
}

impl Product {
    /// Price after discount
    pub fn effective_price(&self) -> f64 {
        money::effective_price(self.price, self.discount)
    }

    pub fn has_discount(&self) -> bool {
        self.discount.is_some_and(|d| d > 0.0)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn has_color(&self, name: &str) -> bool {
        self.colors.iter().any(|c| c.name == name)
    }

    /// Stock for one variant; `None` when there is no table or no such cell
    pub fn stock_for(&self, size: &str, color: &str) -> Option<u32> {
        self.stock.as_ref().and_then(|s| s.get(size, color))
    }

    pub fn total_stock(&self) -> u64 {
        self.stock.as_ref().map(StockTable::total).unwrap_or(0)
    }

    pub fn low_stock_cells(&self, threshold: u32) -> usize {
        self.stock
            .as_ref()
            .map(|s| s.low_stock_cells(threshold))
            .unwrap_or(0)
    }

    /// Recompute `in_stock` from the stock table. Without a table the manual
    /// flag is left alone.
    pub fn sync_in_stock(&mut self) {
        if let Some(stock) = &self.stock {
            self.in_stock = stock.has_stock();
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCreate {
    pub name: String,
    /// Derived from `name` when absent or empty
    pub slug: Option<String>,
    pub description: String,
    pub price: f64,
    pub discount: Option<f64>,
    pub images: Vec<String>,
    pub category: String,
    pub sizes: Vec<String>,
    pub colors: Vec<ColorOption>,
    pub featured: bool,
    pub in_stock: bool,
    pub stock: Option<StockTable>,
    pub details: Option<ProductDetails>,
}

impl ProductCreate {
    /// Materialize into a product with the given id
    pub fn into_product(self, id: String) -> Product {
        let slug = match self.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => util::slugify(&self.name),
        };
        Product {
            id,
            name: self.name,
            slug,
            description: self.description,
            price: self.price,
            discount: self.discount,
            images: self.images,
            category: self.category,
            sizes: self.sizes,
            colors: self.colors,
            featured: self.featured,
            in_stock: self.in_stock,
            stock: self.stock,
            details: self.details,
        }
    }
}

/// Update product payload (shallow merge, `None` = keep current value)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discount: Option<f64>,
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<ColorOption>>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
    pub stock: Option<StockTable>,
    pub details: Option<ProductDetails>,
}

impl ProductUpdate {
    /// Whether the payload touches the stock table
    pub fn touches_stock(&self) -> bool {
        self.stock.is_some()
    }

    /// Overwrite every field present in the payload
    pub fn apply_to(self, product: &mut Product) {
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.slug {
            product.slug = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = self.discount {
            product.discount = Some(v);
        }
        if let Some(v) = self.images {
            product.images = v;
        }
        if let Some(v) = self.category {
            product.category = v;
        }
        if let Some(v) = self.sizes {
            product.sizes = v;
        }
        if let Some(v) = self.colors {
            product.colors = v;
        }
        if let Some(v) = self.featured {
            product.featured = v;
        }
        if let Some(v) = self.in_stock {
            product.in_stock = v;
        }
        if let Some(v) = self.stock {
            product.stock = Some(v);
        }
        if let Some(v) = self.details {
            product.details = Some(v);
        }
    }
}
