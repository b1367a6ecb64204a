//! Wishlist Store
//!
//! A set of whole products keyed by id, kept in insertion order. Persisted
//! as an id list and re-resolved against the catalog on load.

use crate::catalog::CatalogStore;
use crate::storage::{self, KvStore, WISHLIST_KEY};
use parking_lot::RwLock;
use shared::Product;
use std::sync::Arc;

pub struct WishlistStore {
    storage: Arc<dyn KvStore>,
    items: RwLock<Vec<Product>>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("items", &self.items.read().len())
            .finish()
    }
}

impl WishlistStore {
    /// Rehydrate from the persisted id list, dropping ids the catalog no longer has
    pub fn load(storage: Arc<dyn KvStore>, catalog: &CatalogStore) -> Self {
        let ids = storage::load_ids(storage.as_ref(), WISHLIST_KEY);
        let items = resolve_ids(&ids, catalog);
        if items.len() != ids.len() {
            tracing::info!(
                dropped = ids.len() - items.len(),
                "Wishlist entries no longer in catalog"
            );
            storage::persist(storage.as_ref(), WISHLIST_KEY, &id_list(&items));
        }
        tracing::info!("♡ WishlistStore: Restored {} items", items.len());

        Self {
            storage,
            items: RwLock::new(items),
        }
    }

    /// Add unless already present; `true` when added
    pub fn add_item(&self, product: &Product) -> bool {
        let mut items = self.items.write();
        if items.iter().any(|p| p.id == product.id) {
            return false;
        }
        items.push(product.clone());
        self.save(&items);
        true
    }

    /// Remove if present; `true` when removed
    pub fn remove_item(&self, product_id: &str) -> bool {
        let mut items = self.items.write();
        let Some(index) = items.iter().position(|p| p.id == product_id) else {
            return false;
        };
        items.remove(index);
        self.save(&items);
        true
    }

    /// Flip membership; returns membership afterwards
    pub fn toggle_item(&self, product: &Product) -> bool {
        let mut items = self.items.write();
        let now_member = match items.iter().position(|p| p.id == product.id) {
            Some(index) => {
                items.remove(index);
                false
            }
            None => {
                items.push(product.clone());
                true
            }
        };
        self.save(&items);
        now_member
    }

    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.items.read().iter().any(|p| p.id == product_id)
    }

    pub fn items(&self) -> Vec<Product> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn persist(&self) {
        self.save(&self.items.read());
    }

    fn save(&self, items: &[Product]) {
        storage::persist(self.storage.as_ref(), WISHLIST_KEY, &id_list(items));
    }
}

/// Look up each id in the catalog, skipping unknown and repeated ids
pub(crate) fn resolve_ids(ids: &[String], catalog: &CatalogStore) -> Vec<Product> {
    let mut resolved: Vec<Product> = Vec::with_capacity(ids.len());
    for id in ids {
        if resolved.iter().any(|p| &p.id == id) {
            continue;
        }
        if let Some(product) = catalog.by_id(id) {
            resolved.push(product);
        }
    }
    resolved
}

pub(crate) fn id_list(items: &[Product]) -> Vec<&str> {
    items.iter().map(|p| p.id.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{load_ids, save_json, RedbStore};

    fn setup() -> (Arc<dyn KvStore>, Arc<CatalogStore>) {
        let storage: Arc<dyn KvStore> = Arc::new(RedbStore::open_in_memory().unwrap());
        let catalog = Arc::new(CatalogStore::load(
            storage.clone(),
            shared::catalog::default_catalog().unwrap(),
        ));
        (storage, catalog)
    }

    #[test]
    fn test_add_is_idempotent() {
        let (storage, catalog) = setup();
        let wishlist = WishlistStore::load(storage, &catalog);
        let jacket = catalog.by_id("1").unwrap();
        assert!(wishlist.add_item(&jacket));
        assert!(!wishlist.add_item(&jacket));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (storage, catalog) = setup();
        let wishlist = WishlistStore::load(storage, &catalog);
        wishlist.add_item(&catalog.by_id("1").unwrap());
        assert!(wishlist.remove_item("1"));
        assert!(!wishlist.remove_item("1"));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let (storage, catalog) = setup();
        let wishlist = WishlistStore::load(storage, &catalog);
        let tee = catalog.by_id("2").unwrap();

        assert!(!wishlist.is_in_wishlist("2"));
        assert!(wishlist.toggle_item(&tee));
        assert!(wishlist.is_in_wishlist("2"));
        assert!(!wishlist.toggle_item(&tee));
        assert!(!wishlist.is_in_wishlist("2"));
    }

    #[test]
    fn test_persists_ids_in_order() {
        let (storage, catalog) = setup();
        let wishlist = WishlistStore::load(storage.clone(), &catalog);
        wishlist.add_item(&catalog.by_id("6").unwrap());
        wishlist.add_item(&catalog.by_id("2").unwrap());
        assert_eq!(load_ids(storage.as_ref(), WISHLIST_KEY), ["6", "2"]);

        let reloaded = WishlistStore::load(storage, &catalog);
        assert_eq!(id_list(&reloaded.items()), ["6", "2"]);
    }

    #[test]
    fn test_load_drops_unknown_ids() {
        let (storage, catalog) = setup();
        save_json(storage.as_ref(), WISHLIST_KEY, &["3", "gone", "3", "1"]).unwrap();
        let wishlist = WishlistStore::load(storage.clone(), &catalog);
        assert_eq!(id_list(&wishlist.items()), ["3", "1"]);
        assert_eq!(load_ids(storage.as_ref(), WISHLIST_KEY), ["3", "1"]);
    }

    #[test]
    fn test_load_resolves_current_catalog_record() {
        let (storage, catalog) = setup();
        save_json(storage.as_ref(), WISHLIST_KEY, &["2"]).unwrap();
        catalog.write_product("2", |p| p.price = 79.0);
        let wishlist = WishlistStore::load(storage, &catalog);
        assert_eq!(wishlist.items()[0].price, 79.0);
    }
}
