//! Rehydration merge between the bundled catalog and a persisted snapshot
//!
//! Persisted records win field by field over the bundled record with the same
//! id, so fields added to the bundled schema after the snapshot was taken
//! still show up. Bundled products missing from the snapshot are appended.

use serde_json::{Map, Value};
use shared::Product;
use std::collections::HashSet;

/// Merge raw snapshot entries over the bundled catalog
///
/// Each entry is overlaid field by field on the bundled record with the same
/// id. An entry that cannot form a valid product falls back to that bundled
/// record; one with no bundled counterpart is logged and dropped. Bundled
/// products absent from the snapshot are appended in bundled order.
pub fn reconcile(defaults: &[Product], persisted: Vec<Value>) -> Vec<Product> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(persisted.len() + defaults.len());

    for entry in persisted {
        let Value::Object(fields) = entry else {
            tracing::warn!("Skipping non-object catalog entry");
            continue;
        };
        let default = fields
            .get("id")
            .and_then(Value::as_str)
            .and_then(|id| defaults.iter().find(|d| d.id == id));

        let mut base = default
            .and_then(|d| match serde_json::to_value(d) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            })
            .unwrap_or_else(Map::new);
        base.extend(fields);

        let product = match serde_json::from_value::<Product>(Value::Object(base)) {
            Ok(product) => product,
            Err(e) => match default {
                Some(default) => {
                    tracing::warn!(product_id = %default.id, error = %e, "Unreadable catalog entry, restoring bundled record");
                    default.clone()
                }
                None => {
                    tracing::warn!(error = %e, "Dropping unreadable catalog entry");
                    continue;
                }
            },
        };
        if seen.insert(product.id.clone()) {
            merged.push(product);
        }
    }

    merged.extend(
        defaults
            .iter()
            .filter(|d| !seen.contains(&d.id))
            .cloned(),
    );
    merged
}
