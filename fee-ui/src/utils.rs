use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace, a leading `$`,
/// and commas used as thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim()
        .replace(',', "")
}

/// Parses the base-price text field.
///
/// Empty or whitespace-only input means "no price" and yields `Ok(None)`.
/// Non-empty input that is not a number is an error.
pub fn parse_price_input(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized.parse().map(Some).map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Formats an amount as dollars with exactly two decimal places
/// (`1180` becomes `"$1180.00"`). Half-cents round away from zero.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_price_accepts_comma_thousands_separator() {
        assert_eq!(parse_price_input("1,234.56").unwrap(), Some(dec!(1234.56)));
        assert_eq!(parse_price_input("1,234,567.89").unwrap(), Some(dec!(1234567.89)));
    }

    #[test]
    fn parse_price_strips_dollar_sign_and_whitespace() {
        assert_eq!(parse_price_input("  $ 1000 ").unwrap(), Some(dec!(1000)));
    }

    #[test]
    fn parse_price_empty_is_none() {
        assert_eq!(parse_price_input("").unwrap(), None);
        assert_eq!(parse_price_input("   ").unwrap(), None);
    }

    #[test]
    fn parse_price_invalid_returns_error() {
        let err = parse_price_input("abc").unwrap_err();
        assert!(err.to_string().starts_with("invalid decimal 'abc'"));
    }

    #[test]
    fn format_currency_pads_to_two_places() {
        assert_eq!(format_currency(dec!(1180)), "$1180.00");
        assert_eq!(format_currency(dec!(7.5)), "$7.50");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn format_currency_rounds_half_cents_up() {
        assert_eq!(format_currency(dec!(10.005)), "$10.01");
        assert_eq!(format_currency(dec!(10.004)), "$10.00");
    }

    #[test]
    fn format_currency_handles_negative_amounts() {
        assert_eq!(format_currency(dec!(-3.2)), "-$3.20");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }
}
