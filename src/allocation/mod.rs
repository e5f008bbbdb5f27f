//! Bucket model, proportional splitting, balance application and the
//! movement ledger.

pub mod bucket;
pub mod movement;
pub mod split;

pub use bucket::{weights_of, Bucket, BucketId, BucketKind, BucketWeight};
pub use movement::{
    post_to_bucket, record_split, LedgerSummary, Movement, MovementKind,
};
pub use split::{apply_split, redistribute_total, split, ApplyMode, BucketShare, Split};
