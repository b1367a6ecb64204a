//! Money calculation utilities using rust_decimal for precision
//!
//! Arithmetic goes through `Decimal` and is converted back to `f64`
//! (rounded to 2 decimal places) for storage and display. Values outside
//! `Decimal`'s range are computed in `f64` instead.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Discount percentages live in this closed range
pub const MIN_DISCOUNT: f64 = 0.0;
pub const MAX_DISCOUNT: f64 = 100.0;

/// Convert f64 to Decimal for calculation; out-of-range values become zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Clamp a discount percentage into `[0, 100]`. NaN becomes 0.
pub fn clamp_discount(discount: f64) -> f64 {
    if discount.is_nan() {
        return MIN_DISCOUNT;
    }
    discount.clamp(MIN_DISCOUNT, MAX_DISCOUNT)
}

/// Clamp a price to be non-negative. NaN becomes 0.
pub fn clamp_price(price: f64) -> f64 {
    if price.is_nan() || price < 0.0 {
        return 0.0;
    }
    price
}

/// Price after applying an optional percentage discount
///
/// `price × (1 − discount/100)`. A missing or zero discount returns the
/// base price unchanged. The result is capped at `price`, since rounding a
/// sub-cent base to 2dp can otherwise land above it. Prices outside
/// `Decimal`'s range are computed in `f64`.
pub fn effective_price(price: f64, discount: Option<f64>) -> f64 {
    match discount {
        Some(d) if d > 0.0 => {
            let pct = clamp_discount(d);
            let discounted = match Decimal::from_f64(price) {
                Some(base) => {
                    let multiplier = Decimal::ONE - to_decimal(pct) / Decimal::ONE_HUNDRED;
                    to_f64(base * multiplier)
                }
                None => price * (1.0 - pct / 100.0),
            };
            discounted.min(price)
        }
        _ => price,
    }
}

/// Amount taken off `price` by `discount` percent
pub fn discount_amount(price: f64, discount: Option<f64>) -> f64 {
    match discount {
        Some(d) if d > 0.0 => {
            let pct = clamp_discount(d);
            match Decimal::from_f64(price) {
                Some(base) => to_f64(base * to_decimal(pct) / Decimal::ONE_HUNDRED),
                None => price * pct / 100.0,
            }
        }
        _ => 0.0,
    }
}

/// `unit_price × quantity`
pub fn line_total(unit_price: f64, quantity: u32) -> f64 {
    Decimal::from_f64(unit_price)
        .and_then(|unit| unit.checked_mul(Decimal::from(quantity)))
        .map(to_f64)
        .unwrap_or(unit_price * f64::from(quantity))
}

/// Sum a sequence of monetary values without accumulating float error
///
/// Falls back to plain `f64` addition when a value or the running total
/// leaves `Decimal`'s range.
pub fn sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.into_iter().collect();
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| {
            Decimal::from_f64(*v).and_then(|d| acc.checked_add(d))
        })
        .map(to_f64)
        .unwrap_or_else(|| values.iter().sum())
}

/// Display formatter: US dollars, no fraction digits, thousands separators
///
/// `1299.0` → `"$1,299"`, `1104.15` → `"$1,104"`, `-5.0` → `"-$5"`.
pub fn format_price(price: f64) -> String {
    let rounded = to_decimal(price).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_without_discount() {
        assert_eq!(effective_price(1299.0, None), 1299.0);
        assert_eq!(effective_price(1299.0, Some(0.0)), 1299.0);
    }

    #[test]
    fn test_effective_price_with_discount() {
        assert_eq!(effective_price(200.0, Some(25.0)), 150.0);
        assert_eq!(effective_price(1299.0, Some(15.0)), 1104.15);
        assert_eq!(effective_price(89.0, Some(100.0)), 0.0);
    }

    #[test]
    fn test_effective_price_never_exceeds_base() {
        for discount in [-50.0, 0.0, 10.0, 99.9, 100.0, 150.0] {
            let eff = effective_price(349.0, Some(discount));
            assert!(eff <= 349.0, "discount {discount} gave {eff}");
            assert!(eff >= 0.0);
        }
    }

    #[test]
    fn test_effective_price_sub_cent_base() {
        // 1.0088991 rounds up to 1.01
        assert_eq!(effective_price(1.009, Some(0.01)), 1.009);
        assert_eq!(effective_price(0.005, Some(1.0)), 0.0);
    }

    #[test]
    fn test_effective_price_beyond_decimal_range() {
        let eff = effective_price(1e30, Some(10.0));
        assert!((eff - 9e29).abs() < 1e16, "got {eff}");
        assert!(eff <= 1e30);
    }

    #[test]
    fn test_discount_amount() {
        assert_eq!(discount_amount(200.0, Some(25.0)), 50.0);
        assert_eq!(discount_amount(200.0, None), 0.0);
    }

    #[test]
    fn test_clamp_discount() {
        assert_eq!(clamp_discount(150.0), 100.0);
        assert_eq!(clamp_discount(-20.0), 0.0);
        assert_eq!(clamp_discount(35.5), 35.5);
        assert_eq!(clamp_discount(f64::NAN), 0.0);
    }

    #[test]
    fn test_clamp_price() {
        assert_eq!(clamp_price(-10.0), 0.0);
        assert_eq!(clamp_price(12.5), 12.5);
    }

    #[test]
    fn test_line_total_and_sum() {
        assert_eq!(line_total(0.1, 3), 0.3);
        assert_eq!(sum([0.1, 0.2]), 0.3);
        assert_eq!(sum([1e30, 1.0]), 1e30);
        assert_eq!(line_total(1e30, 2), 2e30);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1299.0), "$1,299");
        assert_eq!(format_price(89.0), "$89");
        assert_eq!(format_price(1104.15), "$1,104");
        assert_eq!(format_price(1234567.0), "$1,234,567");
        assert_eq!(format_price(0.0), "$0");
        assert_eq!(format_price(999.5), "$1,000");
        assert_eq!(format_price(-5.0), "-$5");
    }
}
