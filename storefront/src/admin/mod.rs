//! Admin Mutation Layer
//!
//! Business rules on top of raw catalog writes:
//!
//! - price is clamped to `>= 0`, discount to `[0, 100]`
//! - stock quantities are clamped to `>= 0`
//! - `in_stock` is recomputed in the same write as any stock change
//! - stock cells outside the declared sizes/colors are logged and kept
//!
//! Every mutation is applied under the catalog write lock and re-persisted
//! before the lock is released.

mod stats;

pub use stats::{CategoryCount, InventoryStats, StockAlert};

use crate::catalog::CatalogStore;
use shared::{money, util, Product, ProductCreate, ProductUpdate, StockTable};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AdminService {
    catalog: Arc<CatalogStore>,
    low_stock_threshold: u32,
}

impl AdminService {
    pub fn new(catalog: Arc<CatalogStore>, low_stock_threshold: u32) -> Self {
        Self {
            catalog,
            low_stock_threshold,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Append a new product with a fresh id
    pub fn add_product(&self, data: ProductCreate) -> Product {
        let product = self.catalog.write(|products| {
            let mut id = util::new_product_id();
            while products.iter().any(|p| p.id == id) {
                id = util::new_product_id();
            }

            let mut product = data.into_product(id);
            product.price = money::clamp_price(product.price);
            product.discount = product.discount.map(money::clamp_discount);
            warn_unknown_variants(&product);
            product.sync_in_stock();

            products.push(product.clone());
            product
        });
        tracing::info!(product_id = %product.id, name = %product.name, "Product added");
        product
    }

    /// Shallow-merge `update` into the product; `false` when the id is unknown
    pub fn update_product(&self, id: &str, update: ProductUpdate) -> bool {
        let updated = self.catalog.write_product(id, |product| {
            let touches_stock = update.touches_stock();
            update.apply_to(product);
            product.price = money::clamp_price(product.price);
            product.discount = product.discount.map(money::clamp_discount);
            if touches_stock {
                warn_unknown_variants(product);
            }
            // `in_stock` is a projection whenever a table exists
            product.sync_in_stock();
        });
        log_outcome("update_product", id, updated);
        updated
    }

    /// Remove a product; idempotent
    pub fn delete_product(&self, id: &str) -> bool {
        let deleted = self.catalog.remove(id);
        log_outcome("delete_product", id, deleted);
        deleted
    }

    /// Set the base price, clamped to `>= 0`
    pub fn update_price(&self, id: &str, price: f64) -> bool {
        let updated = self.catalog.write_product(id, |product| {
            product.price = money::clamp_price(price);
        });
        log_outcome("update_price", id, updated);
        updated
    }

    /// Set the discount percentage, clamped to `[0, 100]`
    pub fn update_discount(&self, id: &str, discount: f64) -> bool {
        let updated = self.catalog.write_product(id, |product| {
            product.discount = Some(money::clamp_discount(discount));
        });
        log_outcome("update_discount", id, updated);
        updated
    }

    /// Set one stock cell (negative quantities store 0) and recompute `in_stock`
    pub fn update_stock(&self, id: &str, size: &str, color: &str, quantity: i64) -> bool {
        let updated = self.catalog.write_product(id, |product| {
            if !product.sizes.iter().any(|s| s == size) || !product.has_color(color) {
                tracing::warn!(
                    product_id = %product.id,
                    size,
                    color,
                    "Stock cell outside declared variants"
                );
            }
            product
                .stock
                .get_or_insert_with(StockTable::new)
                .set(size, color, quantity);
            product.sync_in_stock();
        });
        log_outcome("update_stock", id, updated);
        updated
    }

    /// Replace the whole stock table and recompute `in_stock`
    ///
    /// Cells missing from `stock` are gone afterwards, not zero.
    pub fn bulk_update_stock(&self, id: &str, stock: StockTable) -> bool {
        let updated = self.catalog.write_product(id, |product| {
            product.stock = Some(stock);
            warn_unknown_variants(product);
            product.sync_in_stock();
        });
        log_outcome("bulk_update_stock", id, updated);
        updated
    }

    /// Drop every edit and go back to the bundled catalog
    pub fn reset_catalog(&self) {
        let defaults = self.catalog.defaults().to_vec();
        self.catalog.write(|products| *products = defaults);
        tracing::info!(count = self.catalog.len(), "Catalog reset to bundled defaults");
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats::compute(&self.catalog.products(), self.low_stock_threshold)
    }
}

fn warn_unknown_variants(product: &Product) {
    let Some(stock) = &product.stock else {
        return;
    };
    for cell in stock.unknown_variants(&product.sizes, &product.colors) {
        tracing::warn!(
            product_id = %product.id,
            size = %cell.size,
            color = %cell.color,
            unknown_size = cell.unknown_size,
            "Stock cell outside declared variants"
        );
    }
}

fn log_outcome(op: &str, id: &str, found: bool) {
    if found {
        tracing::debug!(product_id = id, op, "Catalog mutation applied");
    } else {
        tracing::debug!(product_id = id, op, "Product not found, mutation skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{load_raw, KvStore, RedbStore, CATALOG_KEY};
    use shared::ColorOption;

    fn setup() -> (Arc<dyn KvStore>, AdminService) {
        let storage: Arc<dyn KvStore> = Arc::new(RedbStore::open_in_memory().unwrap());
        let defaults = shared::catalog::default_catalog().unwrap();
        let catalog = Arc::new(CatalogStore::load(storage.clone(), defaults));
        (storage, AdminService::new(catalog, 5))
    }

    fn persisted(storage: &Arc<dyn KvStore>) -> Vec<Product> {
        serde_json::from_slice(&load_raw(storage.as_ref(), CATALOG_KEY).unwrap()).unwrap()
    }

    #[test]
    fn test_add_product_assigns_id_and_slug() {
        let (storage, admin) = setup();
        let product = admin.add_product(ProductCreate {
            name: "Linen Blazer".to_string(),
            price: 459.0,
            category: "Outerwear".to_string(),
            sizes: vec!["M".to_string()],
            colors: vec![ColorOption::new("Sand", "#C2B280")],
            stock: Some(StockTable::from_cells([("M", "Sand", 2)])),
            ..Default::default()
        });

        assert!(!product.id.is_empty());
        assert_eq!(product.slug, "linen-blazer");
        assert!(product.in_stock);
        assert_eq!(admin.catalog().len(), 9);
        assert_eq!(persisted(&storage).last().unwrap().id, product.id);
    }

    #[test]
    fn test_add_product_clamps_numbers() {
        let (_, admin) = setup();
        let product = admin.add_product(ProductCreate {
            name: "Oops".to_string(),
            price: -1.0,
            discount: Some(120.0),
            ..Default::default()
        });
        assert_eq!(product.price, 0.0);
        assert_eq!(product.discount, Some(100.0));
        // No table: manual flag stays as given
        assert!(!product.in_stock);
    }

    #[test]
    fn test_update_product_shallow_merge() {
        let (_, admin) = setup();
        assert!(admin.update_product(
            "2",
            ProductUpdate {
                name: Some("Heavy Tee".to_string()),
                ..Default::default()
            }
        ));
        let tee = admin.catalog().by_id("2").unwrap();
        assert_eq!(tee.name, "Heavy Tee");
        assert_eq!(tee.price, 89.0);
        assert_eq!(tee.slug, "essential-cotton-tee");

        assert!(!admin.update_product("missing", ProductUpdate::default()));
    }

    #[test]
    fn test_update_product_with_stock_recomputes_flag() {
        let (_, admin) = setup();
        admin.update_product(
            "4",
            ProductUpdate {
                stock: Some(StockTable::from_cells([("One Size", "Camel", 0)])),
                ..Default::default()
            },
        );
        assert!(!admin.catalog().by_id("4").unwrap().in_stock);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (storage, admin) = setup();
        assert!(admin.delete_product("3"));
        assert!(!admin.delete_product("3"));
        assert_eq!(admin.catalog().len(), 7);
        assert!(persisted(&storage).iter().all(|p| p.id != "3"));
    }

    #[test]
    fn test_update_price_clamps_negative() {
        let (_, admin) = setup();
        assert!(admin.update_price("1", 1099.0));
        assert_eq!(admin.catalog().by_id("1").unwrap().price, 1099.0);
        admin.update_price("1", -5.0);
        assert_eq!(admin.catalog().by_id("1").unwrap().price, 0.0);
        assert!(!admin.update_price("missing", 1.0));
    }

    #[test]
    fn test_update_discount_clamps() {
        let (_, admin) = setup();
        admin.update_discount("1", 150.0);
        assert_eq!(admin.catalog().by_id("1").unwrap().discount, Some(100.0));
        admin.update_discount("1", -20.0);
        assert_eq!(admin.catalog().by_id("1").unwrap().discount, Some(0.0));
        admin.update_discount("1", 15.0);
        assert_eq!(admin.catalog().by_id("1").unwrap().effective_price(), 1104.15);
    }

    #[test]
    fn test_update_stock_clamps_and_recomputes() {
        let (storage, admin) = setup();
        assert!(admin.update_stock("1", "M", "Black", -5));
        let jacket = admin.catalog().by_id("1").unwrap();
        assert_eq!(jacket.stock_for("M", "Black"), Some(0));
        assert!(jacket.in_stock);

        let persisted = persisted(&storage);
        assert_eq!(persisted[0].stock_for("M", "Black"), Some(0));
    }

    #[test]
    fn test_update_stock_creates_table_and_cells() {
        let (_, admin) = setup();
        admin.bulk_update_stock("4", StockTable::new());
        assert!(!admin.catalog().by_id("4").unwrap().in_stock);

        admin.update_stock("4", "One Size", "Grey", 3);
        let scarf = admin.catalog().by_id("4").unwrap();
        assert_eq!(scarf.stock_for("One Size", "Grey"), Some(3));
        assert_eq!(scarf.stock_for("One Size", "Camel"), None);
        assert!(scarf.in_stock);
    }

    #[test]
    fn test_update_stock_last_cell_to_zero() {
        let (_, admin) = setup();
        admin.bulk_update_stock("4", StockTable::from_cells([("One Size", "Camel", 1)]));
        admin.update_stock("4", "One Size", "Camel", 0);
        assert!(!admin.catalog().by_id("4").unwrap().in_stock);
    }

    #[test]
    fn test_bulk_update_stock_replaces_table() {
        let (_, admin) = setup();
        assert!(admin.bulk_update_stock("1", StockTable::from_cells([("M", "Black", 0)])));
        let jacket = admin.catalog().by_id("1").unwrap();
        assert!(!jacket.in_stock);
        assert_eq!(jacket.stock_for("S", "Black"), None);
        assert!(!admin.bulk_update_stock("missing", StockTable::new()));
    }

    #[test]
    fn test_unknown_variant_cells_are_kept() {
        let (_, admin) = setup();
        admin.update_stock("1", "XXXL", "Pink", 2);
        assert_eq!(admin.catalog().by_id("1").unwrap().stock_for("XXXL", "Pink"), Some(2));
    }

    #[test]
    fn test_reset_catalog() {
        let (storage, admin) = setup();
        admin.delete_product("1");
        admin.update_price("2", 1.0);
        admin.reset_catalog();
        let defaults = shared::catalog::default_catalog().unwrap();
        assert_eq!(admin.catalog().products(), defaults);
        assert_eq!(persisted(&storage), defaults);
    }

    #[test]
    fn test_stats_follow_mutations() {
        let (_, admin) = setup();
        admin.update_discount("2", 50.0);
        admin.bulk_update_stock("5", StockTable::new());
        let stats = admin.stats();
        assert_eq!(stats.discounted_products, 1);
        assert_eq!(stats.out_of_stock_products, 1);
        assert_eq!(stats.out_of_stock[0].product_id, "5");
    }
}
