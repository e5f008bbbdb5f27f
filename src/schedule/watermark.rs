use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catch_up::{catch_up_with_limit, CatchUpPlan};
use crate::{allocation::BucketWeight, errors::CalcError};

/// Last date through which daily auto-allocation has been applied.
///
/// One per user. The watermark only ever moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRun {
    pub last_allocation_date: Option<NaiveDate>,
}

impl AllocationRun {
    pub fn new(last_allocation_date: Option<NaiveDate>) -> Self {
        Self {
            last_allocation_date,
        }
    }

    /// Moves the watermark to `date`. Returns `false` and leaves it unchanged
    /// when `date` is not after the current watermark.
    pub fn advance(&mut self, date: NaiveDate) -> bool {
        match self.last_allocation_date {
            Some(current) if date <= current => {
                tracing::debug!(%current, %date, "watermark not advanced");
                false
            }
            _ => {
                self.last_allocation_date = Some(date);
                true
            }
        }
    }

    /// Builds the catch-up plan from this watermark up to `today`.
    pub fn plan(
        &self,
        monthly_income: Decimal,
        buckets: &[BucketWeight],
        today: NaiveDate,
        max_days: u32,
    ) -> Result<CatchUpPlan, CalcError> {
        catch_up_with_limit(
            monthly_income,
            buckets,
            self.last_allocation_date,
            today,
            max_days,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn advances_only_forward() {
        let mut run = AllocationRun::default();
        assert!(run.advance(ymd(2025, 5, 10)));
        assert!(!run.advance(ymd(2025, 5, 10)));
        assert!(!run.advance(ymd(2025, 5, 9)));
        assert_eq!(run.last_allocation_date, Some(ymd(2025, 5, 10)));
        assert!(run.advance(ymd(2025, 5, 11)));
        assert_eq!(run.last_allocation_date, Some(ymd(2025, 5, 11)));
    }
}
