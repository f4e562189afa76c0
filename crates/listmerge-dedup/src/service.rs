use listmerge_core::{Record, RecordId, SearchCriteria};
use serde::Serialize;
use tracing::warn;

use crate::cancel::CancelToken;
use crate::cluster::{ClusterBuilder, SearchOutcome};
use crate::group::{DuplicateGroup, GroupId};
use crate::merge::{MergedRecord, preview_merge};
use crate::{DedupError, Result};

/// Upsert/retire instructions for one merged group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePlan {
    pub group_id: GroupId,
    /// Record to upsert in place of the primary.
    pub merged: MergedRecord,
    /// Non-primary members to retire.
    pub retire: Vec<RecordId>,
}

/// Delete instructions for one group; the primary is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionPlan {
    pub group_id: GroupId,
    pub keep: RecordId,
    pub delete: Vec<RecordId>,
}

/// Entry point used by the presentation layer.
///
/// Coordinates the cluster builder and merge resolver and checks
/// preconditions. Holds no state between calls; plans are returned for the
/// record store to apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateService;

impl DuplicateService {
    pub fn new() -> Self {
        Self
    }

    /// Rejects criteria the cluster builder cannot run with.
    pub fn validate_criteria(criteria: &SearchCriteria) -> Result<()> {
        if criteria.fields.is_empty() {
            return Err(DedupError::Configuration(
                "at least one field must be selected".to_string(),
            ));
        }
        if criteria.max_group_size < 2 {
            return Err(DedupError::Configuration(format!(
                "max group size must be at least 2, got {}",
                criteria.max_group_size
            )));
        }
        if !criteria.exact_match && criteria.threshold > 100 {
            return Err(DedupError::Configuration(format!(
                "threshold must be within 0..=100, got {}",
                criteria.threshold
            )));
        }
        Ok(())
    }

    pub fn find_duplicates<'a>(
        &self,
        records: &'a [Record],
        criteria: &SearchCriteria,
    ) -> Result<SearchOutcome<'a>> {
        Self::validate_criteria(criteria)?;
        Ok(ClusterBuilder::new(criteria).build(records))
    }

    /// Like [`Self::find_duplicates`], but stops between anchors once `cancel`
    /// fires and reports `(visited, total)` progress along the way.
    pub fn find_duplicates_with<'a, 'c>(
        &self,
        records: &'a [Record],
        criteria: &'c SearchCriteria,
        cancel: &CancelToken,
        progress: impl FnMut(usize, usize) + 'c,
    ) -> Result<SearchOutcome<'a>> {
        Self::validate_criteria(criteria)?;
        Ok(ClusterBuilder::new(criteria)
            .with_cancel(cancel.clone())
            .with_progress(progress)
            .build(records))
    }

    pub fn set_primary(&self, group: &mut DuplicateGroup<'_>, record_id: RecordId) -> Result<()> {
        if let Err(err) = group.set_primary(record_id) {
            warn!(group = %group.id(), record = %record_id, "{err}");
            return Err(err);
        }
        Ok(())
    }

    pub fn preview_merge(&self, group: &DuplicateGroup<'_>) -> Result<MergedRecord> {
        preview_merge(group)
    }

    /// Builds merge plans for every group. Fails without producing any plan
    /// if one group has no primary.
    pub fn confirm_merge(&self, groups: &[DuplicateGroup<'_>]) -> Result<Vec<MergePlan>> {
        require_primaries(groups)?;
        groups
            .iter()
            .map(|group| -> Result<MergePlan> {
                let merged = preview_merge(group)?;
                Ok(MergePlan {
                    group_id: group.id(),
                    retire: merged.merged_from.clone(),
                    merged,
                })
            })
            .collect()
    }

    /// Lists the non-primary members of every group for deletion.
    pub fn delete_duplicates(&self, groups: &[DuplicateGroup<'_>]) -> Result<Vec<DeletionPlan>> {
        require_primaries(groups)?;
        groups
            .iter()
            .map(|group| -> Result<DeletionPlan> {
                let keep = group.primary_record_id().ok_or_else(|| missing_primary(group))?;
                Ok(DeletionPlan {
                    group_id: group.id(),
                    keep,
                    delete: group.non_primary_ids(),
                })
            })
            .collect()
    }
}

fn require_primaries(groups: &[DuplicateGroup<'_>]) -> Result<()> {
    match groups.iter().find(|group| group.primary().is_none()) {
        Some(group) => {
            let err = missing_primary(group);
            warn!(group = %group.id(), "{err}");
            Err(err)
        }
        None => Ok(()),
    }
}

fn missing_primary(group: &DuplicateGroup<'_>) -> DedupError {
    DedupError::Precondition(format!("group {} has no primary record", group.id()))
}
