//! Lenient numeric parsing for form input.
//!
//! Pure functions: no I/O, never fails.
//!
//! Reads the longest decimal prefix of the text and treats anything that
//! yields no number (or zero) as `0.0`. "12abc" is 12, "abc" is 0,
//! "1e" is 1.

const INFINITY: &str = "Infinity";

/// Counts as leading whitespace alongside the Unicode spaces.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse a field's text, falling back to `0.0`.
pub fn parse_lenient(text: &str) -> f64 {
    let value = parse_prefix(text).unwrap_or(0.0);
    // NaN and -0 collapse to 0 as well
    if value.is_nan() || value == 0.0 { 0.0 } else { value }
}

/// Parse an optional field: absent fields read as `0.0`.
pub fn parse_field(text: Option<&str>) -> f64 {
    text.map(parse_lenient).unwrap_or(0.0)
}

// ============================================================================
// INTERNAL
// ============================================================================

/// Parse the longest numeric prefix, or None if there is none.
fn parse_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with(INFINITY) {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_lenient("10"), 10.0);
        assert_eq!(parse_lenient("2.5"), 2.5);
        assert_eq!(parse_lenient("-3"), -3.0);
        assert_eq!(parse_lenient("+4"), 4.0);
    }

    #[test]
    fn leading_whitespace_is_skipped() {
        assert_eq!(parse_lenient("   7.25"), 7.25);
        assert_eq!(parse_lenient("\t\n8"), 8.0);
        assert_eq!(parse_lenient("\u{feff}5"), 5.0);
        assert_eq!(parse_lenient("\u{a0}\u{feff} 6.5"), 6.5);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_eq!(parse_lenient("12abc"), 12.0);
        assert_eq!(parse_lenient("3.5 boxes"), 3.5);
        assert_eq!(parse_lenient("1,000"), 1.0);
    }

    #[test]
    fn bare_dot_forms() {
        assert_eq!(parse_lenient(".5"), 0.5);
        assert_eq!(parse_lenient("5."), 5.0);
        assert_eq!(parse_lenient("."), 0.0);
        assert_eq!(parse_lenient("-.25"), -0.25);
    }

    #[test]
    fn exponent_needs_digits() {
        assert_eq!(parse_lenient("1e3"), 1000.0);
        assert_eq!(parse_lenient("2.5E-1"), 0.25);
        assert_eq!(parse_lenient("1e"), 1.0);
        assert_eq!(parse_lenient("1e+"), 1.0);
        assert_eq!(parse_lenient("4ex"), 4.0);
    }

    #[test]
    fn non_numeric_falls_back_to_zero() {
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("abc"), 0.0);
        assert_eq!(parse_lenient("-"), 0.0);
        assert_eq!(parse_lenient("NaN"), 0.0);
    }

    #[test]
    fn negative_zero_reads_as_positive_zero() {
        let value = parse_lenient("-0");
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn infinity_is_accepted() {
        assert_eq!(parse_lenient("Infinity"), f64::INFINITY);
        assert_eq!(parse_lenient("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_lenient("infinity"), 0.0);
    }

    #[test]
    fn absent_field_reads_as_zero() {
        assert_eq!(parse_field(None), 0.0);
        assert_eq!(parse_field(Some("9")), 9.0);
    }
}
