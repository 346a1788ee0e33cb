//! Coercion of free-form numeric input
//!
//! Nothing here fails: malformed quantities become zero and malformed
//! request counts leave the previous value in place.

/// Parse a quantity the way a browser number field reads it: the longest
/// leading numeric prefix wins, anything unusable (empty, non-numeric,
/// non-finite, negative) becomes 0.
pub(crate) fn parse_quantity(input: &str) -> f64 {
    let prefix = numeric_prefix(input.trim_start());
    match prefix.parse::<f64>() {
        Ok(value) => clamp_quantity(value),
        Err(_) => 0.0,
    }
}

/// Clamp a quantity to a finite non-negative value.
pub(crate) fn clamp_quantity(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse a request count. Returns `None` for anything that is not an integer
/// (caller keeps its previous value); integers below 1 clamp to 1 and integers
/// above `u32::MAX` clamp to it, however many digits they have.
pub(crate) fn parse_request_count(input: &str) -> Option<u32> {
    let text = input.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let max = i64::from(u32::MAX);
    let value = match text.parse::<i64>() {
        Ok(value) => value.clamp(1, max),
        // Only out-of-range digit strings get here
        Err(_) if text.starts_with('-') => 1,
        Err(_) => max,
    };
    u32::try_from(value).ok()
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn quantity_plain_numbers() {
        assert_eq!(parse_quantity("0"), 0.0);
        assert_eq!(parse_quantity("12"), 12.0);
        assert_eq!(parse_quantity("2.5"), 2.5);
        assert_eq!(parse_quantity(" 3 "), 3.0);
        assert_eq!(parse_quantity(".5"), 0.5);
        assert_eq!(parse_quantity("5."), 5.0);
        assert_eq!(parse_quantity("1e3"), 1000.0);
        assert_eq!(parse_quantity("+4"), 4.0);
    }

    #[test]
    fn quantity_takes_leading_prefix() {
        assert_eq!(parse_quantity("12abc"), 12.0);
        assert_eq!(parse_quantity("1.5.2"), 1.5);
        assert_eq!(parse_quantity("2e"), 2.0);
        assert_eq!(parse_quantity("2e+"), 2.0);
    }

    #[test]
    fn quantity_garbage_is_zero() {
        assert_eq!(parse_quantity(""), 0.0);
        assert_eq!(parse_quantity("   "), 0.0);
        assert_eq!(parse_quantity("abc"), 0.0);
        assert_eq!(parse_quantity("."), 0.0);
        assert_eq!(parse_quantity("-"), 0.0);
        assert_eq!(parse_quantity("NaN"), 0.0);
        assert_eq!(parse_quantity("Infinity"), 0.0);
    }

    #[test]
    fn quantity_negative_and_overflow_clamp_to_zero() {
        assert_eq!(parse_quantity("-5"), 0.0);
        assert_eq!(parse_quantity("1e400"), 0.0);
    }

    #[test]
    fn request_count_integers() {
        assert_eq!(parse_request_count("1"), Some(1));
        assert_eq!(parse_request_count(" 42 "), Some(42));
    }

    #[test]
    fn request_count_clamps_to_one() {
        assert_eq!(parse_request_count("0"), Some(1));
        assert_eq!(parse_request_count("-7"), Some(1));
    }

    #[test]
    fn request_count_clamps_to_u32_max() {
        assert_eq!(parse_request_count("99999999999"), Some(u32::MAX));
        assert_eq!(parse_request_count("99999999999999999999"), Some(u32::MAX));
        assert_eq!(parse_request_count("-99999999999999999999"), Some(1));
        assert_eq!(parse_request_count("+8"), Some(8));
    }

    #[test]
    fn request_count_rejects_non_integers() {
        assert_eq!(parse_request_count(""), None);
        assert_eq!(parse_request_count("abc"), None);
        assert_eq!(parse_request_count("2.5"), None);
        assert_eq!(parse_request_count("-"), None);
        assert_eq!(parse_request_count("1_000"), None);
    }
}
