//! Fixed-point display formatting for derived fields.
//!
//! Pure functions. Every value written back to a form goes through
//! [`to_fixed_2`].

use crate::parse::parse_lenient;

/// Fixed-point output stops here.
const EXPONENTIAL_THRESHOLD: f64 = 1e21;

/// Render a value with exactly two decimals.
///
/// Exact ties round away from zero (`0.125` → `0.13`) and negative zero
/// renders as `0.00`. Non-finite values render as `Infinity`, `-Infinity`
/// or `NaN`. Magnitudes of 1e21 and up switch to shortest exponential
/// text (`1e+21`).
pub fn to_fixed_2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if value == 0.0 {
        return "0.00".to_string();
    }
    if value.abs() >= EXPONENTIAL_THRESHOLD {
        // Exponent is always positive here
        return format!("{:e}", value).replacen('e', "e+", 1);
    }

    if is_exact_tie(value) {
        let cents = (value * 100.0).round();
        return format!("{:.2}", cents / 100.0);
    }

    format!("{:.2}", value)
}

/// The value a field shows after being written: formatted, then read back.
pub fn displayed(value: f64) -> f64 {
    parse_lenient(&to_fixed_2(value))
}

/// True when `value` lies exactly halfway between two cent values.
///
/// A binary float can only sit on a third-decimal 5 when its fraction is
/// a multiple of 1/8, and then scaling by 100 is exact.
fn is_exact_tie(value: f64) -> bool {
    (value * 8.0).fract() == 0.0 && (value * 100.0).fract().abs() == 0.5
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_decimals_always() {
        assert_eq!(to_fixed_2(20.0), "20.00");
        assert_eq!(to_fixed_2(1000.0), "1000.00");
        assert_eq!(to_fixed_2(3.5), "3.50");
    }

    #[test]
    fn rounds_to_nearest_cent() {
        assert_eq!(to_fixed_2(10.0 / 3.0), "3.33");
        assert_eq!(to_fixed_2(20.0 / 3.0), "6.67");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed_2(0.125), "0.13");
        assert_eq!(to_fixed_2(2.375), "2.38");
        assert_eq!(to_fixed_2(-0.125), "-0.13");
    }

    #[test]
    fn inexact_halves_follow_the_stored_value() {
        // 1.005 is stored slightly below the tie
        assert_eq!(to_fixed_2(1.005), "1.00");
    }

    #[test]
    fn zero_has_no_sign() {
        assert_eq!(to_fixed_2(0.0), "0.00");
        assert_eq!(to_fixed_2(-0.0), "0.00");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(to_fixed_2(f64::INFINITY), "Infinity");
        assert_eq!(to_fixed_2(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(to_fixed_2(f64::NAN), "NaN");
    }

    #[test]
    fn huge_values_use_exponential_text() {
        assert_eq!(to_fixed_2(1e21), "1e+21");
        assert_eq!(to_fixed_2(1.5e21), "1.5e+21");
        assert_eq!(to_fixed_2(-2e22), "-2e+22");
        assert_eq!(to_fixed_2(9.99e20), "999000000000000000000.00");
        assert_eq!(displayed(1e21), 1e21);
    }

    #[test]
    fn displayed_value_is_rounded() {
        assert_eq!(displayed(10.0 / 3.0), 3.33);
        assert_eq!(displayed(25.0), 25.0);
    }
}
