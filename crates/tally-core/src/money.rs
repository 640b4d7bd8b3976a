//! Integer-cents money arithmetic.
//!
//! All monetary values are integer minor units (cents). No floating-point
//! value is ever used to store or compare money; parsing goes straight from
//! the decimal string to cents.

use crate::error::{Result, TallyError};

/// Parse a decimal amount string (e.g., "12", "12.5", "12.50") into cents.
///
/// Accepts a non-negative decimal with at most two fractional digits.
/// Anything else (signs, letters, three decimals, empty fraction) is an
/// `InvalidAmount` error.
pub fn to_cents(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TallyError::InvalidAmount("amount is empty".to_string()));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(TallyError::InvalidAmount(format!(
            "not a decimal number: {}",
            value
        )));
    }
    if fraction.len() > 2 {
        return Err(TallyError::InvalidAmount(format!(
            "more than two decimal places: {}",
            value
        )));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(TallyError::InvalidAmount(format!(
            "not a non-negative decimal: {}",
            value
        )));
    }

    let whole_cents: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<i64>()
            .map_err(|_| TallyError::InvalidAmount(format!("amount too large: {}", value)))?
    };

    // "12.5" means 12.50, not 12.05
    let fraction_cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().unwrap_or(0) * 10,
        _ => fraction.parse::<i64>().unwrap_or(0),
    };

    whole_cents
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction_cents))
        .ok_or_else(|| TallyError::InvalidAmount(format!("amount too large: {}", value)))
}

/// Split a total evenly between the two parties.
///
/// Returns `(share_a, share_b)` with `share_a + share_b == total_cents`
/// exactly. When the total is odd, the one-cent remainder goes to party A.
/// This asymmetry is deterministic and relied upon by callers.
pub fn split_even(total_cents: i64) -> (i64, i64) {
    let share_b = total_cents / 2;
    let share_a = total_cents - share_b;
    (share_a, share_b)
}

/// Format cents as a display string (e.g., 123456 -> "$1234.56").
///
/// Pure function of the cents value; negative amounts keep the sign ahead
/// of the dollar symbol.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents_whole() {
        assert_eq!(to_cents("12").unwrap(), 1200);
        assert_eq!(to_cents("0").unwrap(), 0);
    }

    #[test]
    fn test_to_cents_two_decimals() {
        assert_eq!(to_cents("12.34").unwrap(), 1234);
        assert_eq!(to_cents("0.01").unwrap(), 1);
    }

    #[test]
    fn test_to_cents_one_decimal_is_tens() {
        assert_eq!(to_cents("12.5").unwrap(), 1250);
    }

    #[test]
    fn test_to_cents_leading_dot() {
        assert_eq!(to_cents(".99").unwrap(), 99);
    }

    #[test]
    fn test_to_cents_rejects_negative() {
        assert!(to_cents("-1.00").is_err());
    }

    #[test]
    fn test_to_cents_rejects_three_decimals() {
        assert!(to_cents("1.234").is_err());
    }

    #[test]
    fn test_to_cents_rejects_garbage() {
        assert!(to_cents("abc").is_err());
        assert!(to_cents("").is_err());
        assert!(to_cents(".").is_err());
        assert!(to_cents("1.2.3").is_err());
    }

    #[test]
    fn test_split_even_exact() {
        assert_eq!(split_even(10000), (5000, 5000));
    }

    #[test]
    fn test_split_even_odd_cent_to_party_a() {
        assert_eq!(split_even(10001), (5001, 5000));
        assert_eq!(split_even(1), (1, 0));
    }

    #[test]
    fn test_split_even_zero() {
        assert_eq!(split_even(0), (0, 0));
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(123456), "$1234.56");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(-250), "-$2.50");
    }
}
