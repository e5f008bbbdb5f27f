use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a bucket by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketId(pub i64);

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BucketId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// What a bucket is saved for. `Giant` buckets fund debt payoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    #[default]
    Generic,
    Giant,
}

/// A named savings category with a percentage weight and running balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: BucketId,
    pub name: String,
    #[serde(default)]
    pub kind: BucketKind,
    /// Share of incoming funds, 0–100. Weights are normalized on split, so
    /// they need not add up to 100.
    pub weight_percent: Decimal,
    #[serde(default)]
    pub balance: Decimal,
}

impl Bucket {
    pub fn new(id: impl Into<BucketId>, name: impl Into<String>, weight_percent: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: BucketKind::Generic,
            weight_percent,
            balance: Decimal::ZERO,
        }
    }

    pub fn with_kind(mut self, kind: BucketKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    /// The snapshot the splitter works with.
    pub fn weight(&self) -> BucketWeight {
        BucketWeight {
            id: self.id,
            weight: self.weight_percent,
        }
    }
}

/// Weight snapshot consumed by [`crate::allocation::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketWeight {
    pub id: BucketId,
    pub weight: Decimal,
}

impl BucketWeight {
    pub fn new(id: impl Into<BucketId>, weight: Decimal) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

impl From<&Bucket> for BucketWeight {
    fn from(bucket: &Bucket) -> Self {
        bucket.weight()
    }
}

/// Collects weight snapshots for a set of buckets, preserving order.
pub fn weights_of(buckets: &[Bucket]) -> Vec<BucketWeight> {
    buckets.iter().map(Bucket::weight).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn bucket_defaults_to_generic_with_zero_balance() {
        let bucket = Bucket::new(7, "Emergency", dec!(30));
        assert_eq!(bucket.kind, BucketKind::Generic);
        assert_eq!(bucket.balance, Decimal::ZERO);
        assert_eq!(bucket.weight(), BucketWeight::new(7, dec!(30)));
    }

    #[test]
    fn bucket_kind_deserializes_snake_case() {
        let bucket: Bucket = serde_json::from_str(
            r#"{"id": 3, "name": "Debts", "kind": "giant", "weight_percent": 20.0}"#,
        )
        .expect("deserialize bucket");
        assert_eq!(bucket.id, BucketId(3));
        assert_eq!(bucket.kind, BucketKind::Giant);
        assert_eq!(bucket.weight_percent, dec!(20));
        assert_eq!(bucket.balance, Decimal::ZERO);
    }
}
