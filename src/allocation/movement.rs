use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    bucket::{Bucket, BucketId},
    split::{BucketShare, Split},
};
use crate::{
    errors::CalcError,
    money::{checked_sum, ensure_non_negative, round_cents},
};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Income,
    Expense,
}

impl MovementKind {
    fn sign(self) -> Decimal {
        match self {
            MovementKind::Income => Decimal::ONE,
            MovementKind::Expense => Decimal::NEGATIVE_ONE,
        }
    }
}

/// One ledger entry: money moved into or out of a bucket on a given day.
///
/// `bucket_id` is `None` once the bucket it was posted to has been removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub bucket_id: Option<BucketId>,
    pub kind: MovementKind,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

impl Movement {
    pub fn new(
        bucket_id: impl Into<BucketId>,
        kind: MovementKind,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            bucket_id: Some(bucket_id.into()),
            kind,
            amount,
            description: String::new(),
            date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Amount as it affects the balance: positive for income, negative for
    /// expense.
    pub fn signed_amount(&self) -> Decimal {
        self.amount * self.kind.sign()
    }
}

/// One movement per share of `split`, in split order.
pub fn record_split(
    split: &Split,
    kind: MovementKind,
    description: &str,
    date: NaiveDate,
) -> Vec<Movement> {
    split
        .iter()
        .map(|share| {
            Movement::new(share.id, kind, share.amount, date).with_description(description)
        })
        .collect()
}

/// Posts the whole of `amount` to a single chosen bucket.
///
/// The result is a one-share [`Split`], so it goes through
/// [`apply_split`](super::apply_split) and [`record_split`] like any other.
pub fn post_to_bucket(
    amount: Decimal,
    bucket_id: BucketId,
    buckets: &[Bucket],
) -> Result<Split, CalcError> {
    ensure_non_negative(amount, "amount")?;
    if !buckets.iter().any(|bucket| bucket.id == bucket_id) {
        tracing::warn!(bucket = %bucket_id, "posting to unknown bucket");
        return Err(CalcError::InvalidInput(format!(
            "bucket {bucket_id} does not exist"
        )));
    }
    Ok(std::iter::once(BucketShare {
        id: bucket_id,
        amount: round_cents(amount),
    })
    .collect())
}

/// Income, expense and resulting balance over a set of movements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub income: Decimal,
    pub expense: Decimal,
    /// `income - expense`; negative when spending outran income.
    pub balance: Decimal,
}

impl LedgerSummary {
    pub fn from_movements(movements: &[Movement]) -> Result<Self, CalcError> {
        let income = total_of(movements, MovementKind::Income)?;
        let expense = total_of(movements, MovementKind::Expense)?;
        let balance = income
            .checked_sub(expense)
            .ok_or_else(|| CalcError::InvalidInput("ledger balance is too large".into()))?;
        Ok(Self {
            income,
            expense,
            balance,
        })
    }
}

fn total_of(movements: &[Movement], kind: MovementKind) -> Result<Decimal, CalcError> {
    checked_sum(
        movements
            .iter()
            .filter(|movement| movement.kind == kind)
            .map(|movement| movement.amount),
        "ledger total",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{apply_split, split, weights_of, ApplyMode};
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn buckets() -> Vec<Bucket> {
        vec![
            Bucket::new(1, "Essentials", dec!(60)),
            Bucket::new(2, "Savings", dec!(40)),
        ]
    }

    #[test]
    fn split_becomes_one_movement_per_share() {
        let day = ymd(2025, 3, 5);
        let shares = split(dec!(250), &weights_of(&buckets())).expect("split");
        let movements = record_split(&shares, MovementKind::Income, "Salary", day);

        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].bucket_id, Some(BucketId(1)));
        assert_eq!(movements[0].amount, dec!(150));
        assert_eq!(movements[1].amount, dec!(100));
        assert!(movements
            .iter()
            .all(|movement| movement.description == "Salary" && movement.date == day));
    }

    #[test]
    fn manual_posting_targets_one_bucket() {
        let mut buckets = buckets();
        let posting = post_to_bucket(dec!(19.999), BucketId(2), &buckets).expect("post");
        assert_eq!(posting.len(), 1);
        assert_eq!(posting.get(BucketId(2)), Some(dec!(20.00)));

        apply_split(&mut buckets, &posting, ApplyMode::Debit).expect("debit");
        assert_eq!(buckets[0].balance, Decimal::ZERO);
        assert_eq!(buckets[1].balance, dec!(-20));
    }

    #[test]
    fn manual_posting_rejects_bad_input() {
        assert!(matches!(
            post_to_bucket(dec!(10), BucketId(9), &buckets()),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            post_to_bucket(dec!(-10), BucketId(1), &buckets()),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn summary_nets_income_against_expense() {
        let day = ymd(2025, 3, 5);
        let movements = vec![
            Movement::new(1, MovementKind::Income, dec!(1000), day),
            Movement::new(2, MovementKind::Expense, dec!(250.50), day),
            Movement::new(1, MovementKind::Expense, dec!(800), day),
        ];
        let summary = LedgerSummary::from_movements(&movements).expect("summary");
        assert_eq!(summary.income, dec!(1000));
        assert_eq!(summary.expense, dec!(1050.50));
        assert_eq!(summary.balance, dec!(-50.50));
        assert_eq!(movements[1].signed_amount(), dec!(-250.50));

        assert_eq!(
            LedgerSummary::from_movements(&[]).expect("summary"),
            LedgerSummary::default()
        );
    }

    #[test]
    fn deleted_bucket_serializes_as_null() {
        let mut movement = Movement::new(3, MovementKind::Income, dec!(5), ymd(2025, 1, 1));
        movement.bucket_id = None;
        let json = serde_json::to_string(&movement).expect("serialize");
        assert!(json.contains(r#""bucket_id":null"#));
        assert!(json.contains(r#""kind":"income""#));
        assert!(json.contains(r#""amount":"5""#));
    }
}
