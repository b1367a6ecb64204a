//! Storefront state layer
//!
//! Catalog, admin mutations, cart, wishlist and recently-viewed stores for
//! the storefront and its admin console. Every store persists a JSON
//! snapshot into a redb key-value file after each change and rehydrates
//! from it at startup.
//!
//! # Module structure
//!
//! ```text
//! storefront/src/
//! ├── core/             # Config, StoreState
//! ├── storage/          # KvStore trait, redb backend, snapshot keys
//! ├── catalog/          # CatalogStore, filtering/sorting, rehydration merge
//! ├── admin/            # AdminService mutations, inventory stats
//! ├── cart/             # CartStore
//! ├── wishlist/         # WishlistStore
//! ├── recently_viewed/  # RecentlyViewedStore
//! ├── availability.rs   # variant stock checks before add-to-cart
//! ├── checkout.rs       # simulated order submission
//! └── utils/            # logger
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront::{Config, RedbStore, StoreState};
//!
//! let storage = Arc::new(RedbStore::open_in_memory().unwrap());
//! let state = StoreState::with_storage(storage, &Config::from_env()).unwrap();
//!
//! let jacket = state.catalog.by_slug("minimalist-leather-jacket").unwrap();
//! state.cart.add_item(&jacket, "M", "Black", 2);
//! assert_eq!(state.cart.total_items(), 2);
//! ```

pub mod admin;
pub mod availability;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod recently_viewed;
pub mod storage;
pub mod utils;
pub mod wishlist;

// Re-export public types
pub use admin::{AdminService, InventoryStats};
pub use availability::Availability;
pub use cart::CartStore;
pub use catalog::{CatalogStore, ProductQuery, SortKey};
pub use checkout::CheckoutReceipt;
pub use core::{Config, StoreState};
pub use recently_viewed::RecentlyViewedStore;
pub use storage::{KvStore, RedbStore, StorageError, StorageResult};
pub use wishlist::WishlistStore;

// Re-export shared types
pub use shared::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging from the environment
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
