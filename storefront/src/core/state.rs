use std::sync::Arc;

use shared::AppResult;

use crate::admin::AdminService;
use crate::cart::CartStore;
use crate::catalog::CatalogStore;
use crate::core::Config;
use crate::recently_viewed::RecentlyViewedStore;
use crate::storage::{KvStore, RedbStore};
use crate::wishlist::WishlistStore;

/// Store state - owns one instance of every store
///
/// Built once at startup and handed to consumers by reference. Cloning is
/// cheap: every store sits behind an `Arc`.
///
/// # Stores
///
/// | Field | Type | Persisted under |
/// |-------|------|-----------------|
/// | catalog | Arc<CatalogStore> | `admin_products` |
/// | admin | AdminService | (writes through catalog) |
/// | cart | Arc<CartStore> | `cart` |
/// | wishlist | Arc<WishlistStore> | `wishlist` |
/// | recently_viewed | Arc<RecentlyViewedStore> | `recentlyViewed` |
///
/// # Example
///
/// ```ignore
/// let state = StoreState::initialize(&Config::from_env())?;
/// let jacket = state.catalog.by_slug("minimalist-leather-jacket");
/// state.shutdown();
/// ```
#[derive(Clone, Debug)]
pub struct StoreState {
    pub config: Config,
    pub catalog: Arc<CatalogStore>,
    pub admin: AdminService,
    pub cart: Arc<CartStore>,
    pub wishlist: Arc<WishlistStore>,
    pub recently_viewed: Arc<RecentlyViewedStore>,
}

impl StoreState {
    /// Open the database under `work_dir` and rehydrate every store
    pub fn initialize(config: &Config) -> AppResult<Self> {
        let db_path = config.db_path();
        let storage = RedbStore::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Storage opened");
        Self::with_storage(Arc::new(storage), config)
    }

    /// Rehydrate every store from `storage`
    ///
    /// The catalog loads first; wishlist and recently-viewed resolve their
    /// ids against it.
    pub fn with_storage(storage: Arc<dyn KvStore>, config: &Config) -> AppResult<Self> {
        let defaults = shared::catalog::default_catalog()?;
        let catalog = Arc::new(CatalogStore::load(storage.clone(), defaults));
        let admin = AdminService::new(catalog.clone(), config.low_stock_threshold);
        let cart = Arc::new(CartStore::load(storage.clone()));
        let wishlist = Arc::new(WishlistStore::load(storage.clone(), &catalog));
        let recently_viewed = Arc::new(RecentlyViewedStore::load(
            storage,
            &catalog,
            config.recently_viewed_capacity,
        ));

        Ok(Self {
            config: config.clone(),
            catalog,
            admin,
            cart,
            wishlist,
            recently_viewed,
        })
    }

    /// Related products using the configured limit
    pub fn related(&self, product: &shared::Product) -> Vec<shared::Product> {
        self.catalog
            .related(product, self.config.related_products_limit)
    }

    /// Record a product page view by slug; `None` when the slug is unknown
    pub fn view_product(&self, slug: &str) -> Option<shared::Product> {
        let product = self.catalog.by_slug(slug)?;
        self.recently_viewed.add_item(&product);
        Some(product)
    }

    /// Final persist of every store
    pub fn shutdown(&self) {
        self.catalog.persist();
        self.cart.persist();
        self.wishlist.persist();
        self.recently_viewed.persist();
        tracing::info!("Store state persisted");
    }
}
