//! Fixed two-decimal money strings.
//!
//! Catalog prices and order amounts are stored as canonical strings such as
//! `"1150.00"`. Arithmetic happens on `f64`; [`to_fixed_2`] converts back using
//! the exact binary value of the float and rounds half away from zero at the
//! third decimal, which is what JavaScript's `Number.prototype.toFixed(2)` does.

const FIXED_NOTATION_LIMIT: f64 = 1e21;

/// Formats `value` with exactly two fraction digits.
pub fn to_fixed_2(value: f64) -> String {
    if !value.is_finite() || value.abs() >= FIXED_NOTATION_LIMIT {
        return value.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // 30 digits is far below the spacing between any f64 and a .xx5 tie in
    // this range, so the third digit decides the rounding direction exactly.
    let exact = format!("{:.30}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let digit = |idx: usize| -> u128 {
        frac_part
            .as_bytes()
            .get(idx)
            .map(|b| u128::from(b - b'0'))
            .unwrap_or(0)
    };

    let whole: u128 = int_part.parse().unwrap_or(0);
    let mut cents = whole * 100 + digit(0) * 10 + digit(1);
    if digit(2) >= 5 {
        cents += 1;
    }

    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

/// Parses a stored or submitted price. Returns `None` unless it is a finite number.
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Canonical two-decimal form of a submitted price.
pub fn normalize_price(raw: &str) -> Option<String> {
    parse_price(raw).map(to_fixed_2)
}
