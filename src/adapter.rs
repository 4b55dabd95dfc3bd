//! Adapter layer: converts between the UI's f64 world and the ledger's Decimal amounts.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Convert f64 to Decimal. Non-finite input maps to zero.
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Strict conversion for ledger amounts: `None` when `v` is not finite or is
/// outside the range `Decimal` can hold.
pub fn try_to_decimal(v: f64) -> Option<Decimal> {
    if v.is_finite() { Decimal::from_f64(v) } else { None }
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Fixed-point rendering, same rounding as JS `Number.prototype.toFixed` for
/// the magnitudes the demo shows.
pub fn to_fixed(v: f64, decimals: usize) -> String {
    let v = if v.is_finite() { v } else { 0.0 };
    // Avoid "-0.00"
    let rounded = format!("{:.*}", decimals, v);
    if rounded.starts_with('-') && rounded.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        rounded.trim_start_matches('-').to_string()
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimal_round_trip_for_demo_amounts() {
        assert_eq!(to_decimal(2.5), dec!(2.5));
        assert_eq!(from_decimal(dec!(950)), 950.0);
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn strict_conversion_refuses_out_of_range_values() {
        assert_eq!(try_to_decimal(95.0), Some(dec!(95)));
        assert_eq!(try_to_decimal(1e30), None);
        assert_eq!(try_to_decimal(-1e30), None);
        assert_eq!(try_to_decimal(f64::INFINITY), None);
    }

    #[test]
    fn to_fixed_formats_like_the_page() {
        assert_eq!(to_fixed(2.5, 3), "2.500");
        assert_eq!(to_fixed(12.0, 2), "12.00");
        assert_eq!(to_fixed(24.0, 1), "24.0");
        assert_eq!(to_fixed(-0.0001, 2), "0.00");
        assert_eq!(to_fixed(f64::INFINITY, 1), "0.0");
    }
}
