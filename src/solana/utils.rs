use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::entity::ValidationError;

/// Fractional digits shown for amounts in the widget.
pub const DISPLAY_DECIMALS: u32 = 6;

/// Parse a user-entered amount. Only non-negative decimals are accepted.
pub fn parse_amount(text: &str) -> Result<Decimal, ValidationError> {
    let amount = Decimal::from_str(text.trim()).map_err(|_| ValidationError::InvalidAmount)?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::InvalidAmount);
    }

    Ok(amount)
}

/// Convert a decimal amount into integer base units, dropping any precision
/// beyond `decimals`.
pub fn to_smallest_unit(amount: Decimal, decimals: u32) -> Result<u64, ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::InvalidAmount);
    }

    let factor = 10u64
        .checked_pow(decimals)
        .map(Decimal::from)
        .ok_or(ValidationError::InvalidAmount)?;

    amount
        .checked_mul(factor)
        .map(|scaled| scaled.trunc())
        .and_then(|scaled| scaled.to_u64())
        .ok_or(ValidationError::InvalidAmount)
}

/// Convert integer base units back into a decimal amount.
pub fn from_smallest_unit(raw: u64, decimals: u32) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(raw), decimals)
}

/// Format an amount with exactly six fractional digits.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMALS);
    rounded.to_string()
}

/// Short form of a balance for the "Balance:" line.
pub fn format_balance(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(4);
    rounded.to_string()
}
