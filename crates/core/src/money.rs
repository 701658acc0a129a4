//! Money helpers built on `rust_decimal`.
//!
//! Form fields arrive as free text. Conversion is explicit "parse-or-default":
//! blank or malformed input becomes zero instead of an error, and every
//! monetary value is rounded to two decimals half-away-from-zero.

use core::str::FromStr;

use rust_decimal::prelude::*;

/// Number of decimal places for monetary values.
pub const MONEY_DECIMALS: u32 = 2;

/// Parse a decimal form field, degrading to zero on blank or malformed text.
///
/// Accepts plain (`"12.5"`) and scientific (`"1.25e1"`) notation.
pub fn parse_decimal_or_zero(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or_else(|_| {
            tracing::debug!(value = %trimmed, "non-numeric amount treated as zero");
            Decimal::ZERO
        })
}

/// Parse a quantity form field.
///
/// Fractional input is truncated toward zero; negative, blank, malformed or
/// out-of-range input yields zero.
pub fn parse_quantity_or_zero(raw: &str) -> u32 {
    let value = parse_decimal_or_zero(raw).trunc();
    if value.is_sign_negative() {
        return 0;
    }
    value.to_u32().unwrap_or(0)
}

/// Round to two decimals, midpoints away from zero (`0.005 -> 0.01`).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a monetary value with exactly two decimals.
pub fn format_money(value: Decimal) -> String {
    let rounded = round_money(value);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn blank_and_garbage_parse_to_zero() {
        assert_eq!(parse_decimal_or_zero(""), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("   "), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("abc"), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("NaN"), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("Infinity"), Decimal::ZERO);
    }

    #[test]
    fn parses_plain_and_scientific() {
        assert_eq!(parse_decimal_or_zero(" 12.50 "), dec("12.50"));
        assert_eq!(parse_decimal_or_zero("1.25e1"), dec("12.5"));
    }

    #[test]
    fn quantity_truncates_and_rejects_negatives() {
        assert_eq!(parse_quantity_or_zero("2"), 2);
        assert_eq!(parse_quantity_or_zero("2.9"), 2);
        assert_eq!(parse_quantity_or_zero("-3"), 0);
        assert_eq!(parse_quantity_or_zero(""), 0);
        assert_eq!(parse_quantity_or_zero("99999999999"), 0);
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        assert_eq!(round_money(dec("0.005")), dec("0.01"));
        assert_eq!(round_money(dec("0.015")), dec("0.02"));
        assert_eq!(round_money(dec("-0.005")), dec("-0.01"));
        assert_eq!(round_money(dec("2.344")), dec("2.34"));
    }

    #[test]
    fn format_always_has_two_decimals() {
        assert_eq!(format_money(Decimal::ZERO), "0.00");
        assert_eq!(format_money(dec("230")), "230.00");
        assert_eq!(format_money(dec("1.5")), "1.50");
        assert_eq!(format_money(dec("1.005")), "1.01");
    }

    proptest! {
        #[test]
        fn rounding_is_idempotent(cents in -10_000_000i64..10_000_000i64, extra in 0u32..1000) {
            let value = Decimal::new(cents * 1000 + i64::from(extra), 5);
            let once = round_money(value);
            prop_assert_eq!(round_money(once), once);
            prop_assert!(once.scale() <= MONEY_DECIMALS);
        }
    }
}
