//! Shared types for the storefront
//!
//! Product/variant/stock data model, cart line items, money helpers, the
//! unified error type and the bundled default catalog. Everything here is
//! plain data and pure functions; stateful stores live in `storefront`.

pub mod catalog;
pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{CartItem, CartKey, ColorOption, Product, ProductCreate, ProductUpdate, StockTable};
pub use serde::{Deserialize, Serialize};
