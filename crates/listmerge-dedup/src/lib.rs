//! listmerge dedup engine: duplicate contact detection and merge planning.

pub mod cancel;
pub mod cluster;
pub mod compare;
pub mod error;
pub mod group;
pub mod merge;
pub mod normalize;
pub mod service;
pub mod similarity;

pub use cancel::CancelToken;
pub use cluster::{ClusterBuilder, SearchOutcome};
pub use compare::{FieldVerdict, PairComparison, compare_records};
pub use error::{DedupError, Result};
pub use group::{DuplicateGroup, GroupId};
pub use merge::{FilledField, MergedRecord, preview_merge};
pub use normalize::normalize_field;
pub use service::{DeletionPlan, DuplicateService, MergePlan};
pub use similarity::similarity_score;
