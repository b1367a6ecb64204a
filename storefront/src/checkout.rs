//! Simulated checkout boundary
//!
//! Reads the cart totals, issues a receipt and clears the cart. There is
//! no payment step.

use crate::cart::CartStore;
use serde::Serialize;
use shared::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order_ref: String,
    pub lines: usize,
    pub items: u64,
    pub total: f64,
    /// Unix millis
    pub placed_at: i64,
}

/// Submit the current cart
///
/// Fails with [`ErrorCode::CartEmpty`] when there is nothing to order.
pub fn submit(cart: &CartStore) -> AppResult<CheckoutReceipt> {
    let items = cart.items();
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }

    let receipt = CheckoutReceipt {
        order_ref: format!("ORD-{}", shared::util::snowflake_id()),
        lines: items.len(),
        items: items.iter().map(|item| item.quantity as u64).sum(),
        total: shared::money::sum(items.iter().map(|item| item.line_total())),
        placed_at: shared::util::now_millis(),
    };
    cart.clear_cart();
    cart.close_cart();

    tracing::info!(
        order_ref = %receipt.order_ref,
        items = receipt.items,
        total = receipt.total,
        "Checkout completed"
    );
    Ok(receipt)
}
