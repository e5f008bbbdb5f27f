//! Decimal helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::errors::CalcError;

/// Number of fractional digits every monetary result is rounded to.
pub const MONEY_SCALE: u32 = 2;

/// Smallest representable monetary step.
pub const CENT: Decimal = dec!(0.01);

/// Rounds to cents, halves away from zero (`0.005 -> 0.01`, `-0.005 -> -0.01`).
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rejects negative values with [`CalcError::InvalidInput`].
pub(crate) fn ensure_non_negative(value: Decimal, label: &str) -> Result<Decimal, CalcError> {
    if value.is_sign_negative() && !value.is_zero() {
        tracing::warn!(%value, field = label, "rejecting negative input");
        return Err(CalcError::InvalidInput(format!(
            "{label} must not be negative (got {value})"
        )));
    }
    Ok(value)
}

/// Adds `values` up, failing with [`CalcError::InvalidInput`] instead of
/// overflowing.
pub(crate) fn checked_sum<I>(values: I, label: &str) -> Result<Decimal, CalcError>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or_else(|| {
            tracing::warn!(field = label, "sum overflowed");
            CalcError::InvalidInput(format!("{label} is too large"))
        })
}
