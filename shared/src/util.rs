/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Fresh product id (time-based, string form)
pub fn new_product_id() -> String {
    snowflake_id().to_string()
}

/// URL slug from a display name: lowercase, each whitespace run becomes `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            slug.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Minimalist Leather Jacket"), "minimalist-leather-jacket");
        assert_eq!(slugify("Silk\tShirt  Ivory"), "silk-shirt-ivory");
        assert_eq!(slugify("T-Shirt"), "t-shirt");
    }

    #[test]
    fn test_snowflake_ids_are_positive_and_mostly_unique() {
        let ids: std::collections::HashSet<i64> = (0..100).map(|_| snowflake_id()).collect();
        assert!(ids.iter().all(|&id| id > 0));
        assert!(ids.len() > 90);
    }

    #[test]
    fn test_new_product_id_is_numeric() {
        assert!(new_product_id().parse::<i64>().is_ok());
    }
}
