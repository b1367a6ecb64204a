//! Cart Store
//!
//! Line items keyed by `(product id, size, color)`. Each line holds the
//! product as it was when first added, and totals use that snapshot's base
//! price. Stock is not consulted here; callers check availability first
//! (see [`crate::availability`]).

use crate::storage::{self, KvStore, CART_KEY};
use parking_lot::RwLock;
use shared::{money, CartItem, CartKey, Product};
use std::sync::Arc;

#[derive(Debug, Default)]
struct CartState {
    items: Vec<CartItem>,
    /// Drawer flag, session-local
    is_open: bool,
}

pub struct CartStore {
    storage: Arc<dyn KvStore>,
    state: RwLock<CartState>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("CartStore")
            .field("lines", &state.items.len())
            .field("is_open", &state.is_open)
            .finish()
    }
}

impl CartStore {
    /// Rehydrate from storage; a missing or malformed snapshot starts empty
    pub fn load(storage: Arc<dyn KvStore>) -> Self {
        let items = match storage::load_raw(storage.as_ref(), CART_KEY) {
            None => Vec::new(),
            Some(bytes) => match serde_json::from_slice::<Vec<CartItem>>(&bytes) {
                Ok(mut items) => {
                    items.retain(|item| item.quantity > 0);
                    items
                }
                Err(e) => {
                    tracing::error!(error = %e, "Malformed cart snapshot, starting empty");
                    Vec::new()
                }
            },
        };
        tracing::info!("🛒 CartStore: Restored {} line items", items.len());

        Self {
            storage,
            state: RwLock::new(CartState {
                items,
                is_open: false,
            }),
        }
    }

    /// Add `quantity` units of a variant, merging into an existing line
    ///
    /// Returns `false` (and changes nothing) for a zero quantity.
    pub fn add_item(&self, product: &Product, size: &str, color: &str, quantity: u32) -> bool {
        if quantity == 0 {
            tracing::debug!(product_id = %product.id, "Ignoring zero-quantity add");
            return false;
        }
        self.mutate(|items| {
            match items
                .iter_mut()
                .find(|item| item.matches(&product.id, size, color))
            {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(quantity);
                }
                None => items.push(CartItem {
                    product: product.clone(),
                    size: size.to_string(),
                    color: color.to_string(),
                    quantity,
                }),
            }
        });
        tracing::debug!(product_id = %product.id, size, color, quantity, "Added to cart");
        true
    }

    /// Set a line's quantity; `<= 0` removes the line. `false` when no such line.
    pub fn update_quantity(&self, product_id: &str, size: &str, color: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id, size, color);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let mut state = self.state.write();
        let Some(item) = state
            .items
            .iter_mut()
            .find(|item| item.matches(product_id, size, color))
        else {
            return false;
        };
        item.quantity = quantity;
        storage::persist(self.storage.as_ref(), CART_KEY, &state.items);
        true
    }

    /// Delete a line; `false` when it was not there
    pub fn remove_item(&self, product_id: &str, size: &str, color: &str) -> bool {
        let mut state = self.state.write();
        let Some(index) = state
            .items
            .iter()
            .position(|item| item.matches(product_id, size, color))
        else {
            return false;
        };
        state.items.remove(index);
        storage::persist(self.storage.as_ref(), CART_KEY, &state.items);
        true
    }

    pub fn clear_cart(&self) {
        self.mutate(Vec::clear);
        tracing::debug!("Cart cleared");
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.state.read().items.clone()
    }

    pub fn item(&self, key: &CartKey) -> Option<CartItem> {
        self.state
            .read()
            .items
            .iter()
            .find(|item| item.matches(&key.product_id, &key.size, &key.color))
            .cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    /// Number of distinct lines
    pub fn line_count(&self) -> usize {
        self.state.read().items.len()
    }

    /// Sum of quantities
    pub fn total_items(&self) -> u64 {
        self.state
            .read()
            .items
            .iter()
            .map(|item| item.quantity as u64)
            .sum()
    }

    /// Sum of `quantity × base price` over the line snapshots
    pub fn total_price(&self) -> f64 {
        money::sum(self.state.read().items.iter().map(CartItem::line_total))
    }

    // =========================================================================
    // Drawer
    // =========================================================================

    pub fn open_cart(&self) {
        self.state.write().is_open = true;
    }

    pub fn close_cart(&self) {
        self.state.write().is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.state.read().is_open
    }

    /// Re-persist the current lines
    pub fn persist(&self) {
        let state = self.state.read();
        storage::persist(self.storage.as_ref(), CART_KEY, &state.items);
    }

    fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<CartItem>),
    {
        let mut state = self.state.write();
        f(&mut state.items);
        storage::persist(self.storage.as_ref(), CART_KEY, &state.items);
    }
}
