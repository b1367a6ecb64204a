//! Recently-Viewed Store
//!
//! Most-recent-first list of products, bounded by a fixed capacity.
//! Re-viewing moves a product to the front; overflow evicts from the tail.

use crate::catalog::CatalogStore;
use crate::storage::{self, KvStore, RECENTLY_VIEWED_KEY};
use crate::wishlist::{id_list, resolve_ids};
use parking_lot::RwLock;
use shared::Product;
use std::sync::Arc;

pub const DEFAULT_CAPACITY: usize = 8;

pub struct RecentlyViewedStore {
    storage: Arc<dyn KvStore>,
    capacity: usize,
    items: RwLock<Vec<Product>>,
}

impl std::fmt::Debug for RecentlyViewedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentlyViewedStore")
            .field("items", &self.items.read().len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl RecentlyViewedStore {
    /// Rehydrate from the persisted id list
    ///
    /// Unknown ids are dropped and the list is cut to `capacity`.
    pub fn load(storage: Arc<dyn KvStore>, catalog: &CatalogStore, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let ids = storage::load_ids(storage.as_ref(), RECENTLY_VIEWED_KEY);
        let mut items = resolve_ids(&ids, catalog);
        items.truncate(capacity);
        if items.len() != ids.len() {
            storage::persist(storage.as_ref(), RECENTLY_VIEWED_KEY, &id_list(&items));
        }
        tracing::info!("👁 RecentlyViewedStore: Restored {} items", items.len());

        Self {
            storage,
            capacity,
            items: RwLock::new(items),
        }
    }

    /// Record a view: move or insert at the front, evict beyond capacity
    pub fn add_item(&self, product: &Product) {
        let mut items = self.items.write();
        if items.first().is_some_and(|p| p.id == product.id) {
            // Already at the front; just refresh the record
            items[0] = product.clone();
        } else {
            items.retain(|p| p.id != product.id);
            items.insert(0, product.clone());
            items.truncate(self.capacity);
        }
        storage::persist(self.storage.as_ref(), RECENTLY_VIEWED_KEY, &id_list(&items));
    }

    pub fn clear_items(&self) {
        let mut items = self.items.write();
        items.clear();
        storage::persist(self.storage.as_ref(), RECENTLY_VIEWED_KEY, &id_list(&items));
    }

    pub fn items(&self) -> Vec<Product> {
        self.items.read().clone()
    }

    /// Recent items other than `product_id` (for "you also viewed" strips)
    pub fn items_except(&self, product_id: &str) -> Vec<Product> {
        self.items
            .read()
            .iter()
            .filter(|p| p.id != product_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn persist(&self) {
        let items = self.items.read();
        storage::persist(self.storage.as_ref(), RECENTLY_VIEWED_KEY, &id_list(&items));
    }
}
