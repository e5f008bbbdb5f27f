use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{calendar::days_in_month, DEFAULT_MAX_CATCH_UP_DAYS};
use crate::{
    allocation::{split, BucketId, BucketWeight, Movement, MovementKind},
    errors::CalcError,
    money::{checked_sum, ensure_non_negative},
};

/// One bucket's share of one day's income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAllocation {
    pub date: NaiveDate,
    pub bucket_id: BucketId,
    pub amount: Decimal,
}

impl DailyAllocation {
    /// The income movement recording this allocation.
    pub fn to_movement(&self, description: &str) -> Movement {
        Movement::new(self.bucket_id, MovementKind::Income, self.amount, self.date)
            .with_description(description)
    }
}

/// Lazy sequence of [`DailyAllocation`]s, ordered by date then bucket order.
///
/// Days are split on demand. Cloning a plan, or calling [`CatchUpPlan::restart`],
/// replays the same allocations; applying them and storing
/// [`CatchUpPlan::watermark`] is the caller's job.
#[derive(Debug, Clone)]
pub struct CatchUpPlan {
    monthly_income: Decimal,
    weights: Vec<BucketWeight>,
    first_day: NaiveDate,
    last_day: NaiveDate,
    days: i64,
    cursor: Option<NaiveDate>,
    pending: std::vec::IntoIter<DailyAllocation>,
}

impl CatchUpPlan {
    fn empty(today: NaiveDate) -> Self {
        Self {
            monthly_income: Decimal::ZERO,
            weights: Vec::new(),
            first_day: today,
            last_day: today,
            days: 0,
            cursor: None,
            pending: Vec::new().into_iter(),
        }
    }

    /// Number of days the plan covers.
    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }

    /// First day allocated, if any.
    pub fn first_day(&self) -> Option<NaiveDate> {
        (!self.is_empty()).then_some(self.first_day)
    }

    /// Date to store as the new watermark once the plan has been applied.
    /// `None` when there is nothing to apply.
    pub fn watermark(&self) -> Option<NaiveDate> {
        (!self.is_empty()).then_some(self.last_day)
    }

    /// A fresh copy of the plan positioned at its first allocation.
    pub fn restart(&self) -> Self {
        let mut plan = self.clone();
        plan.cursor = (!self.is_empty()).then_some(self.first_day);
        plan.pending = Vec::new().into_iter();
        plan
    }

    /// Per-bucket totals over the whole plan, regardless of iteration state.
    pub fn totals(&self) -> BTreeMap<BucketId, Decimal> {
        let mut totals = BTreeMap::new();
        for allocation in self.restart() {
            *totals.entry(allocation.bucket_id).or_insert(Decimal::ZERO) += allocation.amount;
        }
        totals
    }

    /// Every allocation of the plan as an income movement, in plan order.
    pub fn movements(&self, description: &str) -> Vec<Movement> {
        self.restart()
            .map(|allocation| allocation.to_movement(description))
            .collect()
    }

    fn allocations_for(&self, day: NaiveDate) -> Vec<DailyAllocation> {
        let daily_amount = self.monthly_income / Decimal::from(days_in_month(day));
        match split(daily_amount, &self.weights) {
            Ok(result) => result
                .into_iter()
                .map(|share| DailyAllocation {
                    date: day,
                    bucket_id: share.id,
                    amount: share.amount,
                })
                .collect(),
            Err(err) => {
                // Inputs were validated when the plan was built.
                tracing::error!(%day, error = %err, "daily split failed");
                Vec::new()
            }
        }
    }
}

impl Iterator for CatchUpPlan {
    type Item = DailyAllocation;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(allocation) = self.pending.next() {
                return Some(allocation);
            }
            let day = self.cursor?;
            self.pending = self.allocations_for(day).into_iter();
            self.cursor = day.succ_opt().filter(|next| *next <= self.last_day);
        }
    }
}

/// Plans the daily income allocations owed since `last_run` through `today`
/// with the default day cap.
///
/// See [`catch_up_with_limit`].
pub fn catch_up(
    monthly_income: Decimal,
    buckets: &[BucketWeight],
    last_run: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<CatchUpPlan, CalcError> {
    catch_up_with_limit(
        monthly_income,
        buckets,
        last_run,
        today,
        DEFAULT_MAX_CATCH_UP_DAYS,
    )
}

/// Plans the daily income allocations owed since `last_run` through `today`.
///
/// A missing `last_run` means the first run, which only covers `today`. Each
/// day receives `monthly_income / days_in_month(day)`, split across `buckets`
/// by weight. No buckets, or buckets whose weights add up to zero, give an
/// empty plan whatever the span. Otherwise spans longer than `max_days` fail
/// with [`CalcError::RangeTooLarge`].
pub fn catch_up_with_limit(
    monthly_income: Decimal,
    buckets: &[BucketWeight],
    last_run: Option<NaiveDate>,
    today: NaiveDate,
    max_days: u32,
) -> Result<CatchUpPlan, CalcError> {
    ensure_non_negative(monthly_income, "monthly income")?;
    for bucket in buckets {
        ensure_non_negative(bucket.weight, "bucket weight")?;
    }

    let requested = match last_run {
        Some(last) => (today - last).num_days(),
        None => 1,
    };
    if requested <= 0 {
        tracing::debug!(last_run = ?last_run, %today, "catch-up already up to date");
        return Ok(CatchUpPlan::empty(today));
    }

    let total_weight = checked_sum(buckets.iter().map(|bucket| bucket.weight), "bucket weights")?;
    if total_weight.is_zero() {
        tracing::debug!(buckets = buckets.len(), "no weighted buckets, nothing to catch up");
        return Ok(CatchUpPlan::empty(today));
    }
    if requested > i64::from(max_days) {
        tracing::warn!(requested, limit = max_days, "catch-up range too large");
        return Err(CalcError::RangeTooLarge {
            requested,
            limit: max_days,
        });
    }

    // The shortest month yields the largest daily amount; if it splits, and
    // that amount over every day fits, so does every day and every total.
    let largest_day = monthly_income / dec!(28);
    split(largest_day, buckets)?;
    largest_day
        .checked_mul(Decimal::from(requested))
        .ok_or_else(|| {
            CalcError::InvalidInput(format!("monthly income {monthly_income} is too large"))
        })?;

    let first_day = match last_run {
        Some(last) => last
            .succ_opt()
            .ok_or_else(|| CalcError::InvalidInput(format!("no day follows {last}")))?,
        None => today,
    };
    tracing::debug!(
        %first_day,
        %today,
        days = requested,
        buckets = buckets.len(),
        "catch-up plan built"
    );
    Ok(CatchUpPlan {
        monthly_income,
        weights: buckets.to_vec(),
        first_day,
        last_day: today,
        days: requested,
        cursor: Some(first_day),
        pending: Vec::new().into_iter(),
    })
}
