use anyhow::Context;
use storefront::{StoreState, setup_environment};

fn main() -> anyhow::Result<()> {
    // 1. dotenv + logging
    let config = setup_environment();
    tracing::info!(environment = %config.environment, "🛍 Storefront state layer starting...");

    // 2. Open storage and rehydrate every store
    let state = StoreState::initialize(&config).context("failed to initialize store state")?;

    // 3. Summary
    let stats = state.admin.stats();
    tracing::info!(
        products = stats.total_products,
        categories = stats.categories.len(),
        catalog_value = %shared::money::format_price(stats.catalog_value),
        in_stock = stats.in_stock_products,
        out_of_stock = stats.out_of_stock_products,
        low_stock = stats.low_stock.len(),
        "Catalog ready"
    );
    for top in stats.top_categories(5) {
        tracing::info!(category = %top.category, count = top.count, "Top category");
    }
    tracing::info!(
        cart_items = state.cart.total_items(),
        cart_total = %shared::money::format_price(state.cart.total_price()),
        wishlist = state.wishlist.len(),
        recently_viewed = state.recently_viewed.len(),
        "Session restored"
    );

    // 4. Final persist
    state.shutdown();
    Ok(())
}
