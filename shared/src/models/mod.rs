//! Data models
//!
//! Serialized with camelCase keys so persisted snapshots keep the storefront's
//! JSON shape. All IDs are opaque strings.

pub mod cart;
pub mod product;
pub mod stock;

// Re-exports
pub use cart::*;
pub use product::*;
pub use stock::*;
