use rust_decimal::{prelude::ToPrimitive, Decimal};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{errors::CalcError, money::ensure_non_negative};

const DAYS_PER_WEEK: Decimal = dec!(7);

/// Payoff outlook for a single giant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtForecast {
    pub remaining: Decimal,
    /// Weekly goal spread over seven days.
    pub daily_budget: Decimal,
    /// `None` when no weekly goal is set.
    pub days_to_payoff: Option<Decimal>,
}

impl DebtForecast {
    /// Whole days until payoff, rounded up.
    pub fn days_to_payoff_ceil(&self) -> Option<u64> {
        self.days_to_payoff.and_then(|days| days.ceil().to_u64())
    }

    pub fn is_paid_off(&self) -> bool {
        self.remaining.is_zero()
    }
}

/// Forecasts how long a debt takes to pay off at its weekly goal.
///
/// Overpayment clamps `remaining` to zero. A negative weekly goal counts as no
/// goal.
pub fn forecast(
    total_to_pay: Decimal,
    paid_so_far: Decimal,
    weekly_goal: Decimal,
) -> Result<DebtForecast, CalcError> {
    ensure_non_negative(total_to_pay, "total to pay")?;
    ensure_non_negative(paid_so_far, "paid so far")?;

    let remaining = (total_to_pay - paid_so_far).max(Decimal::ZERO);
    let daily_budget = weekly_goal.max(Decimal::ZERO) / DAYS_PER_WEEK;
    let days_to_payoff = (daily_budget > Decimal::ZERO)
        .then(|| remaining.checked_div(daily_budget))
        .flatten();

    tracing::debug!(
        %remaining,
        %daily_budget,
        days = ?days_to_payoff,
        "debt forecast computed"
    );
    Ok(DebtForecast {
        remaining,
        daily_budget,
        days_to_payoff,
    })
}

/// Fraction of the debt already paid, between 0 and 1. Zero when there is
/// nothing to pay.
pub fn progress(total_to_pay: Decimal, paid: Decimal) -> Decimal {
    if total_to_pay <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    // A quotient too large to represent is far past 1.
    paid.max(Decimal::ZERO)
        .checked_div(total_to_pay)
        .map_or(Decimal::ONE, |ratio| ratio.min(Decimal::ONE))
}
