use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    allocation::{Bucket, BucketKind},
    errors::CalcError,
    money::{checked_sum, ensure_non_negative, round_cents},
    schedule::days_in_month,
};

/// Money available per day to put toward giants.
///
/// When buckets of kind [`BucketKind::Giant`] carry a share of income, that
/// share of `monthly_income` is spread over the current month. Otherwise the
/// monthly surplus (income minus expense, never negative) is.
pub fn giant_daily_budget(
    monthly_income: Decimal,
    monthly_expense: Decimal,
    buckets: &[Bucket],
    today: NaiveDate,
) -> Result<Decimal, CalcError> {
    ensure_non_negative(monthly_income, "monthly income")?;
    ensure_non_negative(monthly_expense, "monthly expense")?;

    let days = Decimal::from(days_in_month(today));
    let giant_share = checked_sum(
        buckets
            .iter()
            .filter(|bucket| bucket.kind == BucketKind::Giant)
            .map(|bucket| bucket.weight_percent),
        "giant bucket share",
    )?;

    let monthly = if giant_share > Decimal::ZERO {
        monthly_income
            .checked_mul(giant_share)
            .and_then(|scaled| scaled.checked_div(dec!(100)))
            .ok_or_else(|| {
                CalcError::InvalidInput(format!("monthly income {monthly_income} is too large"))
            })?
    } else {
        (monthly_income - monthly_expense).max(Decimal::ZERO)
    };
    Ok(round_cents(monthly / days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn uses_giant_bucket_share() {
        let buckets = vec![
            Bucket::new(1, "Savings", dec!(70)),
            Bucket::new(2, "Debts", dec!(30)).with_kind(BucketKind::Giant),
        ];
        let daily = giant_daily_budget(dec!(3000), dec!(2500), &buckets, ymd(2025, 4, 3))
            .expect("budget");
        assert_eq!(daily, dec!(30));
    }

    #[test]
    fn falls_back_to_surplus() {
        let buckets = vec![Bucket::new(1, "Savings", dec!(100))];
        let daily = giant_daily_budget(dec!(3000), dec!(2070), &buckets, ymd(2025, 1, 3))
            .expect("budget");
        assert_eq!(daily, dec!(30));

        let deficit = giant_daily_budget(dec!(1000), dec!(2000), &buckets, ymd(2025, 1, 3))
            .expect("budget");
        assert_eq!(deficit, Decimal::ZERO);
    }

    #[test]
    fn oversized_income_is_rejected() {
        let buckets = vec![Bucket::new(1, "Debts", dec!(30)).with_kind(BucketKind::Giant)];
        let err = giant_daily_budget(Decimal::MAX, Decimal::ZERO, &buckets, ymd(2025, 4, 3))
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }
}
