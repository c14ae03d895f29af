//! Exact-decimal money primitives.
//!
//! All monetary arithmetic in the workspace goes through `rust_decimal::Decimal`;
//! binary floats never touch an amount. Every monetary value that leaves a
//! calculation is quantized with [`round2`].

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Number of fractional digits carried by every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Quantize to exactly two fractional digits, rounding half away from zero.
///
/// `0.125` becomes `0.13` (not banker's `0.12`), and `950` becomes `950.00`.
/// Zero is always positive, so negating a zero amount never prints `-0.00`.
pub fn round2(amount: Decimal) -> Decimal {
    let mut quantized =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    quantized.rescale(MONEY_SCALE);
    if quantized.is_zero() {
        quantized.set_sign_positive(true);
    }
    quantized
}

/// Parse a plain decimal amount such as `1000`, `1000.00` or ` 12.5 `.
pub fn parse_amount(input: &str) -> DomainResult<Decimal> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .map_err(|_| DomainError::invalid_numeric(format!("invalid decimal value: {input:?}")))
}

/// Parse a rate given either as a fraction or as a percentage.
///
/// Accepted forms: `0.05`, `5`, `5%`, `2.5 %`. A trailing `%` always means
/// "per hundred". Without it, values greater than 1 are read as percentages
/// and divided by 100, so `1` stays a 100% rate.
pub fn parse_rate(input: &str) -> DomainResult<Decimal> {
    let trimmed = input.trim();
    let (number, explicit_percent) = match trimmed.strip_suffix('%') {
        Some(rest) => (rest.trim_end(), true),
        None => (trimmed, false),
    };

    let value = Decimal::from_str(number)
        .map_err(|_| DomainError::invalid_numeric(format!("invalid percent: {input:?}")))?;

    let rate = if explicit_percent || value > Decimal::ONE {
        value / Decimal::ONE_HUNDRED
    } else {
        value
    };

    if rate.is_sign_negative() || rate > Decimal::ONE {
        tracing::warn!(input, %rate, "rate outside 0%..=100%; using it unclamped");
    }

    Ok(rate)
}

/// Render an amount with exactly two decimals and no grouping (`-50.00`).
pub fn format_amount(amount: Decimal) -> String {
    round2(amount).to_string()
}

/// Render an amount as pounds sterling with thousands separators (`£1,234.50`).
pub fn format_gbp(amount: Decimal) -> String {
    let rounded = round2(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}£{grouped}.{fraction}")
}

/// Render a fractional rate as a percentage (`0.025` → `2.5%`).
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(dec!(0.125)), dec!(0.13));
        assert_eq!(round2(dec!(0.135)), dec!(0.14));
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
        assert_eq!(round2(dec!(-0.125)), dec!(-0.13));
        assert_eq!(round2(dec!(0.124999)), dec!(0.12));
    }

    #[test]
    fn round2_always_carries_two_fractional_digits() {
        assert_eq!(round2(dec!(950)).to_string(), "950.00");
        assert_eq!(round2(dec!(23.7)).to_string(), "23.70");
        assert_eq!(round2(dec!(0)).scale(), MONEY_SCALE);
    }

    #[test]
    fn round2_never_yields_negative_zero() {
        assert_eq!(round2(-Decimal::ZERO).to_string(), "0.00");
        assert_eq!(round2(dec!(-0.001)).to_string(), "0.00");
        assert!(!round2(-dec!(0.00)).is_sign_negative());
        assert_eq!(format_amount(-Decimal::ZERO), "0.00");
    }

    #[test]
    fn parse_amount_accepts_plain_decimals() {
        assert_eq!(parse_amount("1000").unwrap(), dec!(1000));
        assert_eq!(parse_amount(" 1000.00 ").unwrap(), dec!(1000.00));
        assert_eq!(parse_amount("0.125").unwrap(), dec!(0.125));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        match parse_amount("12,5x") {
            Err(DomainError::InvalidNumericInput(msg)) => assert!(msg.contains("12,5x")),
            other => panic!("expected InvalidNumericInput, got {other:?}"),
        }
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn parse_rate_normalizes_percentages() {
        assert_eq!(parse_rate("5").unwrap(), dec!(0.05));
        assert_eq!(parse_rate("5%").unwrap(), dec!(0.05));
        assert_eq!(parse_rate("2.5 %").unwrap(), dec!(0.025));
        assert_eq!(parse_rate("0.05").unwrap(), dec!(0.05));
        assert_eq!(parse_rate("1").unwrap(), dec!(1));
        assert_eq!(parse_rate("100%").unwrap(), dec!(1));
        assert_eq!(parse_rate("0").unwrap(), dec!(0));
    }

    #[test]
    fn explicit_percent_sign_is_always_per_hundred() {
        assert_eq!(parse_rate("0.5%").unwrap(), dec!(0.005));
    }

    #[test]
    fn parse_rate_rejects_garbage() {
        assert!(matches!(
            parse_rate("five"),
            Err(DomainError::InvalidNumericInput(_))
        ));
        assert!(parse_rate("%").is_err());
    }

    #[test]
    fn format_gbp_groups_thousands() {
        assert_eq!(format_gbp(dec!(925)), "£925.00");
        assert_eq!(format_gbp(dec!(1234567.5)), "£1,234,567.50");
        assert_eq!(format_gbp(dec!(100000)), "£100,000.00");
        assert_eq!(format_gbp(dec!(-12)), "-£12.00");
        assert_eq!(format_gbp(dec!(-0.001)), "£0.00");
    }

    #[test]
    fn format_amount_and_percent() {
        assert_eq!(format_amount(dec!(-50)), "-50.00");
        assert_eq!(format_amount(dec!(1000.005)), "1000.01");
        assert_eq!(format_percent(dec!(0.025)), "2.5%");
        assert_eq!(format_percent(dec!(0.05)), "5%");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: quantizing twice is the same as quantizing once.
        #[test]
        fn round2_is_idempotent(units in 0i64..10_000_000_000i64, scale in 0u32..8) {
            let amount = Decimal::new(units, scale);
            let once = round2(amount);
            prop_assert_eq!(once.scale(), MONEY_SCALE);
            prop_assert_eq!(round2(once), once);
        }
    }
}
