//! Rate rounding.
//!
//! Every value a quote emits passes through [`round_rate`] once per stage:
//! after amount scaling, and again after rebasing. Values of at least one keep
//! [`RATE_DECIMAL_PLACES`] decimals; smaller values keep
//! [`RATE_SIGNIFICANT_DIGITS`] significant digits, so a positive input never
//! rounds to zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on values of at least one.
pub const RATE_DECIMAL_PLACES: u32 = 5;

/// Significant digits kept on values below one.
pub const RATE_SIGNIFICANT_DIGITS: u32 = 5;

/// Rounds a quoted value using Banker's Rounding.
#[must_use]
pub fn round_rate(value: Decimal) -> Decimal {
    if value.abs() >= Decimal::ONE {
        return value
            .round_dp_with_strategy(RATE_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
    }

    value
        .round_sf_with_strategy(RATE_SIGNIFICANT_DIGITS, RoundingStrategy::MidpointNearestEven)
        .unwrap_or(value)
}
