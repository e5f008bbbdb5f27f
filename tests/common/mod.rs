#![allow(dead_code)]

use bucket_core::{Bucket, BucketWeight};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Weight snapshots from `(id, weight)` pairs.
pub fn weights(values: &[(i64, Decimal)]) -> Vec<BucketWeight> {
    values
        .iter()
        .map(|(id, weight)| BucketWeight::new(*id, *weight))
        .collect()
}

/// A typical three-bucket household setup: 50/30/20.
pub fn household_buckets() -> Vec<Bucket> {
    vec![
        Bucket::new(1, "Essentials", Decimal::from(50)),
        Bucket::new(2, "Savings", Decimal::from(30)),
        Bucket::new(3, "Debts", Decimal::from(20)).with_kind(bucket_core::BucketKind::Giant),
    ]
}
