//! Daily income catch-up: calendar helpers, the allocation watermark and the
//! lazy per-day allocation plan.

pub mod calendar;
pub mod catch_up;
pub mod watermark;

pub use calendar::{days_in_month, month_start};
pub use catch_up::{catch_up, catch_up_with_limit, CatchUpPlan, DailyAllocation};
pub use watermark::AllocationRun;

/// Default cap on the number of days a single catch-up may cover.
pub const DEFAULT_MAX_CATCH_UP_DAYS: u32 = 366;
