use std::path::PathBuf;

use crate::recently_viewed::DEFAULT_CAPACITY;

/// Storefront configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Directory for the database file |
/// | DB_FILE | storefront.redb | redb file name inside WORK_DIR |
/// | LOG_LEVEL | info | tracing max level |
/// | LOG_DIR | (unset) | Daily rolling log files when set and existing |
/// | RECENTLY_VIEWED_CAPACITY | 8 | Recently-viewed bound |
/// | RELATED_PRODUCTS_LIMIT | 4 | Default related-products count |
/// | LOW_STOCK_THRESHOLD | 5 | Upper bound of a "low" stock cell |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/tmp/shop LOG_LEVEL=debug cargo run -p storefront
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub db_file: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub recently_viewed_capacity: usize,
    pub related_products_limit: usize,
    pub low_stock_threshold: u32,
    /// development | production
    pub environment: String,
}

impl Config {
    /// Load from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            db_file: std::env::var("DB_FILE").unwrap_or_else(|_| "storefront.redb".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            recently_viewed_capacity: std::env::var("RECENTLY_VIEWED_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_CAPACITY),
            related_products_limit: std::env::var("RELATED_PRODUCTS_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
            low_stock_threshold: std::env::var("LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Environment config with a different work dir
    ///
    /// Used by tests
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_work_dir() {
        let config = Config::with_work_dir("/tmp/shop");
        assert_eq!(config.work_dir, "/tmp/shop");
        assert!(config.db_path().starts_with("/tmp/shop"));
        assert!(config.db_path().ends_with(&config.db_file));
    }

    #[test]
    fn test_defaults_are_usable() {
        let config = Config::from_env();
        assert!(config.recently_viewed_capacity > 0);
        assert!(!config.db_file.is_empty());
    }
}
