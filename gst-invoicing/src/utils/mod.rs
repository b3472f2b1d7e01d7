//! Lenient form-value coercion and amount formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest magnitude a stored amount column (`NUMERIC(14, 2)`) can hold.
pub const AMOUNT_CEILING: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Longest leading prefix of `s` that looks like a decimal number:
/// optional sign, digits, optional fraction.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > end + 1 {
            end = frac;
        }
    }

    &s[..end]
}

/// Coerce a raw form value to a decimal.
///
/// Missing, empty or non-numeric values become zero; a leading numeric
/// prefix is honored, so `"12abc"` is 12. Values beyond `AMOUNT_CEILING`
/// are treated as bad input and also become zero.
pub fn parse_decimal(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };
    let prefix = numeric_prefix(raw.trim());
    match Decimal::from_str(prefix) {
        Ok(value) if value.abs() <= AMOUNT_CEILING => value,
        _ => Decimal::ZERO,
    }
}

/// Coerce a raw query value to an integer, truncating any fraction.
pub fn parse_int(raw: Option<&str>) -> i32 {
    let Some(raw) = raw else {
        return 0;
    };
    let prefix = numeric_prefix(raw.trim());
    let whole = prefix.split('.').next().unwrap_or_default();
    whole.parse::<i32>().unwrap_or(0)
}

/// Trimmed owned string, empty when missing.
pub fn text(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or_default().to_string()
}

fn two_places(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Two decimals with thousands separators, e.g. `1,234,567.80`.
pub fn format_amount(value: Decimal) -> String {
    let fixed = two_places(value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac)
}

/// Two decimals, no grouping. Used where the value is edited again.
pub fn format_plain(value: Decimal) -> String {
    two_places(value)
}
