use std::collections::{BTreeMap, HashMap};

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use super::bucket::{weights_of, Bucket, BucketId, BucketWeight};
use crate::{
    errors::CalcError,
    money::{ensure_non_negative, round_cents, CENT},
};

/// Amount allocated to one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketShare {
    pub id: BucketId,
    pub amount: Decimal,
}

/// Result of a proportional split, in the order the buckets were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    shares: Vec<BucketShare>,
}

impl Split {
    pub fn get(&self, id: BucketId) -> Option<Decimal> {
        self.shares
            .iter()
            .find(|share| share.id == id)
            .map(|share| share.amount)
    }

    pub fn total(&self) -> Decimal {
        self.shares.iter().map(|share| share.amount).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BucketShare> {
        self.shares.iter()
    }

    pub fn shares(&self) -> &[BucketShare] {
        &self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<BucketId, Decimal> {
        self.shares
            .iter()
            .map(|share| (share.id, share.amount))
            .collect()
    }
}

impl FromIterator<BucketShare> for Split {
    fn from_iter<I: IntoIterator<Item = BucketShare>>(iter: I) -> Self {
        Self {
            shares: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Split {
    type Item = BucketShare;
    type IntoIter = std::vec::IntoIter<BucketShare>;

    fn into_iter(self) -> Self::IntoIter {
        self.shares.into_iter()
    }
}

/// Splits `amount` across `buckets` in proportion to their weights.
///
/// Every share is rounded to cents (half away from zero). The rounding
/// residual is then handed out one cent at a time, starting with the heaviest
/// bucket (first in input order on ties), so the shares always add up to
/// `round_cents(amount)` exactly.
pub fn split(amount: Decimal, buckets: &[BucketWeight]) -> Result<Split, CalcError> {
    ensure_non_negative(amount, "amount")?;
    for bucket in buckets {
        ensure_non_negative(bucket.weight, "bucket weight")?;
    }

    let total_weight = buckets
        .iter()
        .try_fold(Decimal::ZERO, |acc, bucket| acc.checked_add(bucket.weight))
        .ok_or_else(|| CalcError::InvalidInput("bucket weights overflow".into()))?;
    if total_weight.is_zero() {
        tracing::warn!(buckets = buckets.len(), "split requested with zero total weight");
        return Err(CalcError::InvalidConfiguration(
            "bucket weights must add up to more than zero".into(),
        ));
    }

    let mut shares = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        let raw = amount
            .checked_mul(bucket.weight)
            .and_then(|scaled| scaled.checked_div(total_weight))
            .ok_or_else(|| CalcError::InvalidInput(format!("amount {amount} is too large")))?;
        shares.push(BucketShare {
            id: bucket.id,
            amount: round_cents(raw),
        });
    }

    let target = round_cents(amount);
    let allocated: Decimal = shares.iter().map(|share| share.amount).sum();
    let residual = target - allocated;
    if !residual.is_zero() {
        settle_residual(&mut shares, buckets, residual);
    }

    tracing::debug!(
        %amount,
        buckets = buckets.len(),
        %residual,
        "split computed"
    );
    Ok(Split { shares })
}

fn settle_residual(shares: &mut [BucketShare], buckets: &[BucketWeight], residual: Decimal) {
    let mut order: Vec<usize> = (0..buckets.len()).collect();
    // Stable sort keeps input order among equal weights.
    order.sort_by(|a, b| buckets[*b].weight.cmp(&buckets[*a].weight));

    let step = if residual.is_sign_negative() { -CENT } else { CENT };
    let steps = (residual.abs() / CENT).trunc().to_usize().unwrap_or(0);
    for idx in order.iter().cycle().take(steps) {
        shares[*idx].amount += step;
    }
}

/// How a split is applied to bucket balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyMode {
    /// Incoming funds: each share is added to the balance.
    Credit,
    /// Outgoing funds: each share is subtracted from the balance.
    Debit,
    /// The share becomes the new balance.
    Replace,
}

/// Applies `split` to matching bucket balances.
///
/// Buckets without a share are left untouched. Nothing is modified when the
/// split names a bucket that is not in `buckets` or a balance would overflow.
pub fn apply_split(
    buckets: &mut [Bucket],
    split: &Split,
    mode: ApplyMode,
) -> Result<(), CalcError> {
    let positions: HashMap<BucketId, usize> = buckets
        .iter()
        .enumerate()
        .map(|(idx, bucket)| (bucket.id, idx))
        .collect();

    let mut updates = Vec::with_capacity(split.len());
    for share in split.iter() {
        let idx = positions.get(&share.id).copied().ok_or_else(|| {
            CalcError::InvalidInput(format!("split references unknown bucket {}", share.id))
        })?;
        let balance = buckets[idx].balance;
        let updated = match mode {
            ApplyMode::Credit => balance.checked_add(share.amount),
            ApplyMode::Debit => balance.checked_sub(share.amount),
            ApplyMode::Replace => Some(share.amount),
        }
        .ok_or_else(|| {
            CalcError::InvalidInput(format!("balance of bucket {} would overflow", share.id))
        })?;
        updates.push((idx, updated));
    }

    for (idx, balance) in updates {
        buckets[idx].balance = balance;
    }
    tracing::debug!(?mode, shares = split.len(), "split applied to balances");
    Ok(())
}

/// Spreads a new total balance across `buckets` by weight.
///
/// Pair the result with [`ApplyMode::Replace`].
pub fn redistribute_total(new_total: Decimal, buckets: &[Bucket]) -> Result<Split, CalcError> {
    ensure_non_negative(new_total, "total balance")?;
    split(new_total, &weights_of(buckets))
}
