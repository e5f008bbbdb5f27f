mod common;

use bucket_core::{
    allocation::weights_of, apply_split, catch_up, AllocationRun, ApplyMode, BucketId,
    BucketShare, CalcError, CalculatorConfig, LedgerSummary, Split,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{household_buckets, weights, ymd};

#[test]
fn one_day_behind_allocates_one_days_income() {
    let day = ymd(2025, 4, 18);
    let plan = catch_up(
        dec!(3000),
        &weights(&[(1, dec!(100))]),
        Some(ymd(2025, 4, 17)),
        day,
    )
    .expect("plan");
    let items: Vec<_> = plan.collect();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].date, day);
    assert_eq!(items[0].bucket_id, BucketId(1));
    // April has 30 days.
    assert_eq!(items[0].amount, dec!(100));
}

#[test]
fn same_day_is_already_caught_up() {
    let day = ymd(2025, 4, 18);
    let plan = catch_up(dec!(3000), &weights(&[(1, dec!(100))]), Some(day), day).expect("plan");
    assert_eq!(plan.count(), 0);
}

#[test]
fn watermark_prevents_double_application() {
    let config = CalculatorConfig::default();
    let mut buckets = household_buckets();
    let mut run = AllocationRun::new(Some(ymd(2025, 6, 27)));
    let today = ymd(2025, 6, 30);

    let plan = run
        .plan(dec!(3000), &weights_of(&buckets), today, config.max_catch_up_days)
        .expect("plan");
    assert_eq!(plan.days(), 3);
    let credits: Split = plan
        .totals()
        .into_iter()
        .map(|(id, amount)| BucketShare { id, amount })
        .collect();
    apply_split(&mut buckets, &credits, ApplyMode::Credit).expect("apply");
    let watermark = plan.watermark().expect("watermark");
    assert!(run.advance(watermark));

    // June: 100 per day, 50/30/20 over three days.
    assert_eq!(buckets[0].balance, dec!(150));
    assert_eq!(buckets[1].balance, dec!(90));
    assert_eq!(buckets[2].balance, dec!(60));

    let again = run
        .plan(dec!(3000), &weights_of(&buckets), today, config.max_catch_up_days)
        .expect("plan");
    assert!(again.is_empty());
    assert!(!run.advance(today));
}

#[test]
fn first_run_does_not_backfill() {
    let today = ymd(2025, 2, 10);
    let run = AllocationRun::default();
    let plan = run
        .plan(dec!(2800), &weights(&[(1, dec!(1))]), today, 366)
        .expect("plan");
    assert_eq!(plan.first_day(), Some(today));
    assert_eq!(plan.totals().get(&BucketId(1)), Some(&dec!(100)));
}

#[test]
fn long_absence_is_capped_by_config() {
    let config = CalculatorConfig {
        max_catch_up_days: 30,
        ..CalculatorConfig::default()
    };
    let run = AllocationRun::new(Some(ymd(2025, 1, 1)));
    let err = run
        .plan(
            dec!(3000),
            &weights(&[(1, dec!(100))]),
            ymd(2025, 3, 1),
            config.max_catch_up_days,
        )
        .unwrap_err();
    assert_eq!(
        err,
        CalcError::RangeTooLarge {
            requested: 59,
            limit: 30
        }
    );

    let default_limit = catch_up(
        dec!(3000),
        &weights(&[(1, dec!(100))]),
        Some(ymd(2024, 1, 1)),
        ymd(2025, 1, 2),
    );
    assert!(matches!(
        default_limit,
        Err(CalcError::RangeTooLarge { limit: 366, .. })
    ));
}

#[test]
fn no_buckets_is_a_no_op() {
    let plan = catch_up(dec!(3000), &[], Some(ymd(2025, 1, 1)), ymd(2025, 1, 5)).expect("plan");
    assert!(plan.is_empty());
    assert!(plan.totals().is_empty());
    assert_eq!(plan.totals().values().copied().sum::<Decimal>(), Decimal::ZERO);
}

#[test]
fn negative_weight_fails_before_any_allocation() {
    let err = catch_up(
        dec!(3000),
        &weights(&[(1, dec!(80)), (2, dec!(-20))]),
        Some(ymd(2025, 1, 1)),
        ymd(2025, 1, 5),
    )
    .unwrap_err();
    assert!(matches!(err, CalcError::InvalidInput(_)));
}

#[test]
fn stale_watermark_without_buckets_is_a_no_op() {
    let run = AllocationRun::new(Some(ymd(2020, 1, 1)));
    let plan = run.plan(dec!(3000), &[], ymd(2025, 1, 1), 366).expect("plan");
    assert!(plan.is_empty());
    assert_eq!(plan.watermark(), None);
}

#[test]
fn catch_up_ledger_matches_credited_balances() {
    let mut buckets = household_buckets();
    let plan = catch_up(
        dec!(3000),
        &weights_of(&buckets),
        Some(ymd(2025, 6, 20)),
        ymd(2025, 6, 30),
    )
    .expect("plan");

    let movements = plan.movements("Daily income");
    let credits: Split = plan
        .totals()
        .into_iter()
        .map(|(id, amount)| BucketShare { id, amount })
        .collect();
    apply_split(&mut buckets, &credits, ApplyMode::Credit).expect("apply");

    let summary = LedgerSummary::from_movements(&movements).expect("summary");
    let balances: Decimal = buckets.iter().map(|bucket| bucket.balance).sum();
    // June: 100 per day over ten days.
    assert_eq!(summary.income, dec!(1000));
    assert_eq!(summary.expense, Decimal::ZERO);
    assert_eq!(summary.balance, balances);
}
