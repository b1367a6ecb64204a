//! Core module - configuration and the store state container
//!
//! - [`Config`] - environment-driven configuration
//! - [`StoreState`] - owns every store for the process lifetime

pub mod config;
pub mod state;

pub use config::Config;
pub use state::StoreState;
