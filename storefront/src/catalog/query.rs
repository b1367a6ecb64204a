//! Catalog filtering and sorting
//!
//! Pure functions over product slices. Filters compose conjunctively and an
//! omitted filter is a no-op. Sorting never mutates its input.

use serde::{Deserialize, Serialize};
use shared::Product;
use std::cmp::Ordering;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Sort order for product listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "" => Ok(Self::Default),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Listing filter
///
/// ```
/// use storefront::catalog::ProductQuery;
///
/// let query = ProductQuery::new()
///     .search("wool")
///     .category("Outerwear")
///     .price_range(Some(100.0), Some(1000.0));
/// assert!(!query.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQuery {
    /// Case-insensitive substring over name, description and category
    pub search: Option<String>,
    /// Exact, case-sensitive category
    pub category: Option<String>,
    /// Inclusive lower bound on base price
    pub min_price: Option<f64>,
    /// Inclusive upper bound on base price
    pub max_price: Option<f64>,
    /// Match when the product has at least one of these color names
    pub colors: Vec<String>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Whether no filter is set
    pub fn is_empty(&self) -> bool {
        self.search_needle().is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.colors.is_empty()
    }

    /// Lowercased search text, `None` when blank
    ///
    /// Surrounding whitespace only decides blankness; a non-blank needle is
    /// matched as typed.
    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Whether a single product passes every set filter
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with(product, self.search_needle().as_deref())
    }

    fn matches_with(&self, product: &Product, needle: Option<&str>) -> bool {
        if let Some(needle) = needle
            && !text_matches(product, needle)
        {
            return false;
        }
        if let Some(category) = &self.category
            && &product.category != category
        {
            return false;
        }
        if let Some(min) = self.min_price
            && product.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && product.price > max
        {
            return false;
        }
        if !self.colors.is_empty()
            && !product.colors.iter().any(|c| self.colors.contains(&c.name))
        {
            return false;
        }
        true
    }
}

fn text_matches(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
}

/// Products passing `query`, in input order
pub fn filter_products(products: &[Product], query: &ProductQuery) -> Vec<Product> {
    let needle = query.search_needle();
    products
        .iter()
        .filter(|p| query.matches_with(p, needle.as_deref()))
        .cloned()
        .collect()
}

/// New sequence ordered by `key`; ties keep input order
pub fn sort_products(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::Default => {}
        SortKey::PriceAsc => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::NameAsc => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::NameDesc => sorted.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }
    sorted
}

/// Root-locale style collation
///
/// Compares base letters first (accents and case folded away), then the
/// lowercased names, then the raw strings.
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// NFD with combining marks stripped, lowercased
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ColorOption;

    fn product(id: &str, name: &str, price: f64, category: &str, colors: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            slug: shared::util::slugify(name),
            description: format!("{} description", name),
            price,
            discount: None,
            images: vec![],
            category: category.to_string(),
            sizes: vec!["M".to_string()],
            colors: colors.iter().map(|c| ColorOption::new(*c, "#000000")).collect(),
            featured: false,
            in_stock: true,
            stock: None,
            details: None,
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("1", "Leather Jacket", 1299.0, "Outerwear", &["Black", "Brown"]),
            product("2", "cotton Tee", 89.0, "Tops", &["White"]),
            product("3", "Wool Trousers", 349.0, "Bottoms", &["Charcoal", "Black"]),
            product("4", "Wool Overcoat", 899.0, "Outerwear", &["Camel"]),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_is_noop() {
        let products = sample();
        assert!(ProductQuery::new().is_empty());
        assert!(ProductQuery::new().search("   ").is_empty());
        assert_eq!(filter_products(&products, &ProductQuery::new()), products);
    }

    #[test]
    fn test_search_across_fields_case_insensitive() {
        let products = sample();
        let by_name = filter_products(&products, &ProductQuery::new().search("WOOL"));
        assert_eq!(ids(&by_name), ["3", "4"]);

        let by_category = filter_products(&products, &ProductQuery::new().search("outer"));
        assert_eq!(ids(&by_category), ["1", "4"]);
    }

    #[test]
    fn test_search_keeps_surrounding_whitespace() {
        let products = sample();
        assert!(filter_products(&products, &ProductQuery::new().search(" leather")).is_empty());
        let inner = filter_products(&products, &ProductQuery::new().search("wool "));
        assert_eq!(ids(&inner), ["3", "4"]);
    }

    #[test]
    fn test_category_is_exact() {
        let products = sample();
        assert_eq!(
            ids(&filter_products(&products, &ProductQuery::new().category("Outerwear"))),
            ["1", "4"]
        );
        assert!(filter_products(&products, &ProductQuery::new().category("outerwear")).is_empty());
    }

    #[test]
    fn test_price_range_inclusive() {
        let products = sample();
        let query = ProductQuery::new().price_range(Some(349.0), Some(899.0));
        assert_eq!(ids(&filter_products(&products, &query)), ["3", "4"]);

        let only_max = ProductQuery::new().price_range(None, Some(89.0));
        assert_eq!(ids(&filter_products(&products, &only_max)), ["2"]);
    }

    #[test]
    fn test_colors_match_any() {
        let products = sample();
        let query = ProductQuery::new().colors(["Black", "White"]);
        assert_eq!(ids(&filter_products(&products, &query)), ["1", "2", "3"]);
    }

    #[test]
    fn test_filters_compose() {
        let products = sample();
        let query = ProductQuery::new()
            .search("wool")
            .category("Outerwear")
            .colors(["Camel"]);
        assert_eq!(ids(&filter_products(&products, &query)), ["4"]);
    }

    #[test]
    fn test_sort_by_price() {
        let products = sample();
        assert_eq!(ids(&sort_products(&products, SortKey::PriceAsc)), ["2", "3", "4", "1"]);
        assert_eq!(ids(&sort_products(&products, SortKey::PriceDesc)), ["1", "4", "3", "2"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let products = sample();
        assert_eq!(ids(&sort_products(&products, SortKey::NameAsc)), ["2", "1", "4", "3"]);
        assert_eq!(ids(&sort_products(&products, SortKey::NameDesc)), ["3", "4", "1", "2"]);
    }

    #[test]
    fn test_sort_by_name_folds_accents() {
        let products = vec![
            product("1", "Zip Hoodie", 120.0, "Tops", &[]),
            product("2", "Écharpe", 60.0, "Accessories", &[]),
            product("3", "Foulard", 45.0, "Accessories", &[]),
            product("4", "echarpe", 60.0, "Accessories", &[]),
        ];
        assert_eq!(ids(&sort_products(&products, SortKey::NameAsc)), ["4", "2", "3", "1"]);
        assert_eq!(ids(&sort_products(&products, SortKey::NameDesc)), ["1", "3", "2", "4"]);
    }

    #[test]
    fn test_default_sort_keeps_order_and_input() {
        let products = sample();
        let sorted = sort_products(&products, SortKey::Default);
        assert_eq!(sorted, products);
        let _ = sort_products(&products, SortKey::PriceAsc);
        assert_eq!(ids(&products), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("price-desc".parse::<SortKey>().unwrap(), SortKey::PriceDesc);
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::Default);
        assert!("newest".parse::<SortKey>().is_err());
        assert_eq!(serde_json::to_value(SortKey::NameAsc).unwrap(), "name-asc");
    }
}
