//! Variant availability, checked by callers before adding to the cart

use serde::Serialize;
use shared::Product;

/// Cells at or below this count are flagged as "only N left"
pub const LOW_STOCK_BADGE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Availability {
    /// No stock cell for this variant
    Unknown,
    OutOfStock,
    /// Fewer units than requested
    Insufficient { available: u32 },
    /// `remaining` is what is left after the requested quantity; `low`
    /// marks a cell holding at most [`LOW_STOCK_BADGE`] units
    Available { remaining: u32, low: bool },
}

impl Availability {
    pub fn can_add(&self) -> bool {
        matches!(self, Availability::Available { .. })
    }
}

/// Check `quantity` units of `(size, color)` against the product's stock
///
/// A product without a stock table falls back to its `in_stock` flag and
/// is treated as unbounded when in stock.
pub fn check(product: &Product, size: &str, color: &str, quantity: u32) -> Availability {
    let Some(stock) = &product.stock else {
        return if product.in_stock {
            Availability::Available {
                remaining: u32::MAX,
                low: false,
            }
        } else {
            Availability::OutOfStock
        };
    };

    match stock.get(size, color) {
        None => Availability::Unknown,
        Some(0) => Availability::OutOfStock,
        Some(available) if available < quantity => Availability::Insufficient { available },
        Some(available) => Availability::Available {
            remaining: available - quantity,
            low: available <= LOW_STOCK_BADGE,
        },
    }
}
