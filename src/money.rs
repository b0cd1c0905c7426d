//! Monetary amount parsing and formatting
//!
//! All amounts are `rust_decimal::Decimal` values normalized to 2 fraction
//! digits (centavos). Parsing accepts both pt-BR notation ("1.234,56") and
//! plain decimal notation ("1234.56"); display always uses pt-BR.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// Currency scale: centavos
pub const AMOUNT_SCALE: u32 = 2;

/// Amount parsing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("invalid amount: '{0}'")]
    InvalidFormat(String),

    #[error("amount must be greater than zero")]
    NotPositive,

    #[error("amount precision exceeds {AMOUNT_SCALE} decimal places")]
    PrecisionOverflow,
}

/// Parse a user-entered amount into a positive 2-decimal value.
///
/// A comma marks pt-BR notation: thousands dots are dropped and the comma
/// becomes the decimal separator. Without a comma the input is read as a
/// plain decimal. Zero, negative and over-precise amounts are rejected.
pub fn parse_brl(input: &str) -> Result<Decimal, MoneyError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }

    let normalized = if input.contains(',') {
        input.replace('.', "").replace(',', ".")
    } else {
        input.to_string()
    };

    let value =
        Decimal::from_str(&normalized).map_err(|_| MoneyError::InvalidFormat(input.into()))?;

    if value <= Decimal::ZERO {
        return Err(MoneyError::NotPositive);
    }
    if value.normalize().scale() > AMOUNT_SCALE {
        return Err(MoneyError::PrecisionOverflow);
    }

    let mut value = value;
    value.rescale(AMOUNT_SCALE);
    Ok(value)
}

/// Format a value as Brazilian currency: `R$ 1.234,56`.
///
/// Values are rounded half-up to centavos. Negative values carry a leading
/// minus sign.
pub fn format_brl(value: Decimal) -> String {
    let mut value =
        value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(AMOUNT_SCALE);

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let cents = value.mantissa().unsigned_abs();
    let whole = cents / 100;
    let frac = (cents % 100) as u32;

    format!("{}R$ {},{:02}", sign, group_thousands(whole), frac)
}

/// Interpret a digits-only input as centavos and render it masked, without
/// the currency symbol: `"123456"` becomes `"1.234,56"`.
///
/// Used for live masking of amount fields; non-digits are dropped.
pub fn mask_brl(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }
    let cents: u128 = digits.parse().unwrap_or(0);
    format!("{},{:02}", group_thousands(cents / 100), (cents % 100) as u32)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(*b as char);
    }
    out
}
