#![doc(test(attr(deny(warnings))))]

//! Bucket Core offers the allocation and forecasting primitives behind a
//! personal-finance tracker: proportional income splits across savings
//! buckets, debt ("giant") payoff forecasts, daily income catch-up plans and
//! the bill agenda. Every calculation works on value snapshots handed in by the
//! caller and returns plain values; persistence stays with the host.

pub mod allocation;
pub mod bills;
pub mod config;
pub mod errors;
pub mod giants;
pub mod money;
pub mod schedule;
pub mod utils;

pub use allocation::{
    apply_split, post_to_bucket, record_split, redistribute_total, split, ApplyMode, Bucket,
    BucketId, BucketKind, BucketShare, BucketWeight, LedgerSummary, Movement, MovementKind, Split,
};
pub use bills::{Bill, BillAgenda, BillStatus, OverdueBill};
pub use config::{CalculatorConfig, ConfigManager};
pub use errors::{CalcError, ConfigError};
pub use giants::{
    forecast, giant_daily_budget, DebtForecast, DebtTarget, GiantId, GiantOverview, GiantStatus,
    Payment, PaymentOutcome,
};
pub use schedule::{catch_up, catch_up_with_limit, AllocationRun, CatchUpPlan, DailyAllocation};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(
            version = build.version,
            git_hash = build.git_hash,
            profile = build.profile,
            "Bucket Core tracing initialized."
        );
    });
}
