use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use super::giant::{GiantId, Payment};
use crate::{errors::CalcError, money::checked_sum};

/// Sum of every payment made toward `giant_id`.
pub fn total_paid(payments: &[Payment], giant_id: GiantId) -> Result<Decimal, CalcError> {
    checked_sum(
        payments
            .iter()
            .filter(|payment| payment.giant_id == giant_id)
            .map(|payment| payment.amount),
        "total paid",
    )
}

/// Sum of payments toward `giant_id` dated on or after `today - window_days`.
///
/// A window reaching past the earliest representable date covers every
/// payment.
pub fn deposits_since(
    payments: &[Payment],
    giant_id: GiantId,
    today: NaiveDate,
    window_days: u32,
) -> Result<Decimal, CalcError> {
    let since = today
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);
    checked_sum(
        payments
            .iter()
            .filter(|payment| payment.giant_id == giant_id && payment.date >= since)
            .map(|payment| payment.amount),
        "recent deposits",
    )
}
