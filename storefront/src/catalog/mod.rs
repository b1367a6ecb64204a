//! Catalog Store - canonical product list with read-side derivations
//!
//! Holds the product snapshot behind a `RwLock`. Reads clone out of the
//! snapshot; writes go through [`CatalogStore::write`], which re-persists the
//! whole snapshot under [`CATALOG_KEY`] before releasing the lock.

mod query;
mod reconcile;

pub use query::{filter_products, sort_products, ProductQuery, SortKey};
pub use reconcile::reconcile;

use crate::storage::{self, KvStore, CATALOG_KEY};
use parking_lot::RwLock;
use serde_json::Value;
use shared::Product;
use std::collections::HashSet;
use std::sync::Arc;

pub struct CatalogStore {
    storage: Arc<dyn KvStore>,
    /// Bundled catalog, reference for rehydration and reset
    defaults: Vec<Product>,
    products: RwLock<Vec<Product>>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("products_count", &self.products.read().len())
            .field("defaults_count", &self.defaults.len())
            .finish()
    }
}

impl CatalogStore {
    /// Rehydrate from storage, reconciling against `defaults`
    ///
    /// - no snapshot: defaults are used and persisted verbatim
    /// - snapshot: merged with defaults (see [`reconcile`]) and re-persisted
    /// - unreadable snapshot: logged, defaults used
    pub fn load(storage: Arc<dyn KvStore>, defaults: Vec<Product>) -> Self {
        let products = match storage::load_raw(storage.as_ref(), CATALOG_KEY) {
            None => {
                tracing::info!("No catalog snapshot, using bundled catalog");
                defaults.clone()
            }
            Some(bytes) => match serde_json::from_slice::<Vec<Value>>(&bytes) {
                Ok(entries) => {
                    let persisted = entries.len();
                    let merged = reconcile(&defaults, entries);
                    tracing::info!(
                        persisted,
                        restored = merged.len(),
                        "Catalog snapshot reconciled"
                    );
                    merged
                }
                Err(e) => {
                    tracing::error!(error = %e, "Malformed catalog snapshot, using bundled catalog");
                    defaults.clone()
                }
            },
        };

        storage::persist(storage.as_ref(), CATALOG_KEY, &products);
        tracing::info!("📦 CatalogStore: Loaded {} products", products.len());

        Self {
            storage,
            defaults,
            products: RwLock::new(products),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Full catalog in order
    pub fn products(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.products.read().iter().any(|p| p.id == id)
    }

    pub fn by_id(&self, id: &str) -> Option<Product> {
        self.products.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn by_slug(&self, slug: &str) -> Option<Product> {
        self.products.read().iter().find(|p| p.slug == slug).cloned()
    }

    pub fn featured(&self) -> Vec<Product> {
        self.products
            .read()
            .iter()
            .filter(|p| p.featured)
            .cloned()
            .collect()
    }

    /// Exact, case-sensitive category match
    pub fn by_category(&self, category: &str) -> Vec<Product> {
        self.products
            .read()
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// Distinct categories, first-seen order
    pub fn all_categories(&self) -> Vec<String> {
        let products = self.products.read();
        distinct(products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct color names, first-seen order
    pub fn all_colors(&self) -> Vec<String> {
        let products = self.products.read();
        distinct(
            products
                .iter()
                .flat_map(|p| p.colors.iter().map(|c| c.name.as_str())),
        )
    }

    /// Same-category products other than `product`, catalog order, at most `limit`
    pub fn related(&self, product: &Product, limit: usize) -> Vec<Product> {
        self.products
            .read()
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn filtered(&self, query: &ProductQuery) -> Vec<Product> {
        filter_products(&self.products.read(), query)
    }

    /// Reordered copy of `products`
    pub fn sorted(products: &[Product], key: SortKey) -> Vec<Product> {
        sort_products(products, key)
    }

    /// Filter then sort, the listing page in one call
    pub fn listing(&self, query: &ProductQuery, key: SortKey) -> Vec<Product> {
        sort_products(&self.filtered(query), key)
    }

    /// Bundled catalog this store was loaded against
    pub fn defaults(&self) -> &[Product] {
        &self.defaults
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Mutate the snapshot under the write lock, then re-persist it
    ///
    /// Readers never observe a partial change.
    pub(crate) fn write<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<Product>) -> R,
    {
        let mut products = self.products.write();
        let result = f(&mut products);
        storage::persist(self.storage.as_ref(), CATALOG_KEY, &*products);
        result
    }

    /// Mutate one product by id; `false` (and nothing persisted) when absent
    pub(crate) fn write_product<F>(&self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut Product),
    {
        let mut products = self.products.write();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        f(product);
        storage::persist(self.storage.as_ref(), CATALOG_KEY, &*products);
        true
    }

    /// Remove a product by id; `false` (and nothing persisted) when absent
    pub(crate) fn remove(&self, id: &str) -> bool {
        let mut products = self.products.write();
        let Some(index) = products.iter().position(|p| p.id == id) else {
            return false;
        };
        products.remove(index);
        storage::persist(self.storage.as_ref(), CATALOG_KEY, &*products);
        true
    }

    /// Re-persist the current snapshot
    pub fn persist(&self) {
        let products = self.products.read();
        storage::persist(self.storage.as_ref(), CATALOG_KEY, &*products);
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_owned)
        .collect()
}
