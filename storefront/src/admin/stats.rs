//! Inventory statistics for the admin dashboard

use serde::Serialize;
use shared::{money, Product};

/// A product flagged on the stock dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub product_id: String,
    pub name: String,
    pub total_stock: u64,
    /// Cells with `1..=threshold` units
    pub low_cells: usize,
}

impl StockAlert {
    fn new(product: &Product, threshold: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            total_stock: product.total_stock(),
            low_cells: product.low_stock_cells(threshold),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Snapshot of catalog-wide inventory figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: usize,
    /// Sum of effective prices
    pub catalog_value: f64,
    pub discounted_products: usize,
    /// Sum of `price × discount / 100` over discounted products
    pub total_discount_value: f64,
    /// Mean discount percentage among discounted products, 0 when none
    pub average_discount: f64,
    pub featured_products: usize,
    pub in_stock_products: usize,
    pub out_of_stock_products: usize,
    pub total_units: u64,
    pub low_stock: Vec<StockAlert>,
    pub out_of_stock: Vec<StockAlert>,
    /// Per-category product counts, first-seen order
    pub categories: Vec<CategoryCount>,
}

impl InventoryStats {
    pub fn compute(products: &[Product], low_stock_threshold: u32) -> Self {
        let discounted: Vec<&Product> = products.iter().filter(|p| p.has_discount()).collect();
        let average_discount = if discounted.is_empty() {
            0.0
        } else {
            let total = money::sum(
                discounted
                    .iter()
                    .map(|p| money::clamp_discount(p.discount.unwrap_or_default())),
            );
            money::to_f64(money::to_decimal(total) / rust_decimal::Decimal::from(discounted.len()))
        };

        let low_stock = products
            .iter()
            .filter(|p| p.low_stock_cells(low_stock_threshold) > 0)
            .map(|p| StockAlert::new(p, low_stock_threshold))
            .collect();

        // Without a table the manual flag decides
        let out_of_stock = products
            .iter()
            .filter(|p| match &p.stock {
                Some(stock) => !stock.has_stock(),
                None => !p.in_stock,
            })
            .map(|p| StockAlert::new(p, low_stock_threshold))
            .collect();

        let mut categories: Vec<CategoryCount> = Vec::new();
        for product in products {
            match categories.iter_mut().find(|c| c.category == product.category) {
                Some(entry) => entry.count += 1,
                None => categories.push(CategoryCount {
                    category: product.category.clone(),
                    count: 1,
                }),
            }
        }

        let in_stock_products = products.iter().filter(|p| p.in_stock).count();

        Self {
            total_products: products.len(),
            catalog_value: money::sum(products.iter().map(Product::effective_price)),
            discounted_products: discounted.len(),
            total_discount_value: money::sum(
                products
                    .iter()
                    .map(|p| money::discount_amount(p.price, p.discount)),
            ),
            average_discount,
            featured_products: products.iter().filter(|p| p.featured).count(),
            in_stock_products,
            out_of_stock_products: products.len() - in_stock_products,
            total_units: products.iter().map(Product::total_stock).sum(),
            low_stock,
            out_of_stock,
            categories,
        }
    }

    /// The `n` largest categories, ties in first-seen order
    pub fn top_categories(&self, n: usize) -> Vec<CategoryCount> {
        let mut sorted = self.categories.clone();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted.truncate(n);
        sorted
    }
}
