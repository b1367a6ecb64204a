//! Per-variant stock table
//!
//! Two-level mapping `size → color → quantity`. A missing cell means the
//! variant is unknown/unavailable, which is different from an explicit zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::product::ColorOption;

/// Clamp a signed quantity into the storable range (never negative)
#[inline]
pub fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(0, u32::MAX as i64) as u32
}

/// A stock cell that does not match the product's declared sizes/colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub size: String,
    pub color: String,
    /// `true` when the size itself is undeclared (otherwise only the color is)
    pub unknown_size: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockTable(BTreeMap<String, BTreeMap<String, u32>>);

impl StockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(size, color, quantity)` cells, clamping negatives to zero
    pub fn from_cells<S, C>(cells: impl IntoIterator<Item = (S, C, i64)>) -> Self
    where
        S: Into<String>,
        C: Into<String>,
    {
        let mut table = Self::new();
        for (size, color, quantity) in cells {
            table.set(size, color, quantity);
        }
        table
    }

    /// Quantity for a cell, `None` if the cell does not exist
    pub fn get(&self, size: &str, color: &str) -> Option<u32> {
        self.0.get(size).and_then(|colors| colors.get(color)).copied()
    }

    /// Set a single cell, creating the size row if needed. Returns the stored quantity.
    pub fn set(&mut self, size: impl Into<String>, color: impl Into<String>, quantity: i64) -> u32 {
        let stored = clamp_quantity(quantity);
        self.0
            .entry(size.into())
            .or_default()
            .insert(color.into(), stored);
        stored
    }

    /// Whether any cell holds a positive quantity
    pub fn has_stock(&self) -> bool {
        self.0.values().any(|colors| colors.values().any(|&qty| qty > 0))
    }

    /// Sum of every cell
    pub fn total(&self) -> u64 {
        self.0
            .values()
            .flat_map(|colors| colors.values())
            .map(|&qty| qty as u64)
            .sum()
    }

    /// Number of cells with `0 < quantity <= threshold`
    pub fn low_stock_cells(&self, threshold: u32) -> usize {
        self.cells()
            .filter(|&(_, _, qty)| qty > 0 && qty <= threshold)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|colors| colors.is_empty())
    }

    /// Iterate every `(size, color, quantity)` cell
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.0.iter().flat_map(|(size, colors)| {
            colors
                .iter()
                .map(move |(color, &qty)| (size.as_str(), color.as_str(), qty))
        })
    }

    /// Cells whose size or color is not in the declared variant sets
    pub fn unknown_variants(&self, sizes: &[String], colors: &[ColorOption]) -> Vec<UnknownVariant> {
        self.cells()
            .filter_map(|(size, color, _)| {
                let size_known = sizes.iter().any(|s| s == size);
                let color_known = colors.iter().any(|c| c.name == color);
                if size_known && color_known {
                    None
                } else {
                    Some(UnknownVariant {
                        size: size.to_string(),
                        color: color.to_string(),
                        unknown_size: !size_known,
                    })
                }
            })
            .collect()
    }
}
