//! Decimal arithmetic helpers for monetary amounts and ratios.
//!
//! Amounts are `rust_decimal::Decimal`. Every rounding in the suite is HALF_UP
//! (midpoint away from zero).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Scale used for stored amounts.
pub const DEFAULT_NB_DECIMAL_DIGITS: u32 = 2;

/// Scale used for intermediate ratios.
pub const COMPUTATION_SCALING: u32 = 10;

/// Round to `scale` decimal places, midpoint away from zero.
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// `numerator / denominator` rounded HALF_UP to `scale`.
pub fn divide(numerator: Decimal, denominator: Decimal, scale: u32) -> DomainResult<Decimal> {
    if denominator.is_zero() {
        return Err(DomainError::inconsistency("Division by zero"));
    }
    numerator
        .checked_div(denominator)
        .map(|q| round_half_up(q, scale))
        .ok_or_else(|| DomainError::inconsistency("Decimal overflow"))
}

pub fn checked_add(left: Decimal, right: Decimal) -> DomainResult<Decimal> {
    left.checked_add(right)
        .ok_or_else(|| DomainError::inconsistency("Decimal overflow"))
}

/// `left * right`, unrounded.
pub fn checked_mul(left: Decimal, right: Decimal) -> DomainResult<Decimal> {
    left.checked_mul(right)
        .ok_or_else(|| DomainError::inconsistency("Decimal overflow"))
}

/// `left * right` rounded HALF_UP to `scale`.
pub fn multiply(left: Decimal, right: Decimal, scale: u32) -> DomainResult<Decimal> {
    checked_mul(left, right).map(|v| round_half_up(v, scale))
}

/// `amount * rate / 100` rounded HALF_UP to `scale`.
pub fn percentage_of(amount: Decimal, rate: Decimal, scale: u32) -> DomainResult<Decimal> {
    divide(checked_mul(amount, rate)?, Decimal::ONE_HUNDRED, scale)
}

/// Round an amount to the default number of decimal digits.
pub fn to_amount(value: Decimal) -> Decimal {
    round_half_up(value, DEFAULT_NB_DECIMAL_DIGITS)
}
