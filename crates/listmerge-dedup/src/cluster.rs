use std::collections::{BTreeSet, HashSet};

use listmerge_core::{Record, RecordId, SearchCriteria};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::compare::compare_records;
use crate::group::DuplicateGroup;

/// Groups found by one search, plus how far the scan got.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome<'a> {
    /// Emitted groups, highest `match_score` first.
    pub groups: Vec<DuplicateGroup<'a>>,
    /// False when the scan was cancelled before visiting every anchor.
    pub complete: bool,
    pub anchors_scanned: usize,
    pub comparisons: usize,
    /// Candidate clusters dropped for exceeding `max_group_size`.
    pub discarded_oversized: usize,
}

impl<'a> SearchOutcome<'a> {
    fn empty() -> Self {
        Self {
            groups: Vec::new(),
            complete: true,
            anchors_scanned: 0,
            comparisons: 0,
            discarded_oversized: 0,
        }
    }
}

type ProgressFn<'c> = Box<dyn FnMut(usize, usize) + 'c>;

/// Single-pass, anchor-greedy duplicate clustering.
///
/// Each unprocessed record in input order becomes an anchor and absorbs every
/// later unprocessed record it matches. Matching is not transitive: a record
/// that only matches another member, not the anchor, stays out of the
/// cluster. Criteria must already be validated.
pub struct ClusterBuilder<'c> {
    criteria: &'c SearchCriteria,
    cancel: Option<CancelToken>,
    progress: Option<ProgressFn<'c>>,
}

impl<'c> ClusterBuilder<'c> {
    pub fn new(criteria: &'c SearchCriteria) -> Self {
        Self {
            criteria,
            cancel: None,
            progress: None,
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Called with `(records_visited, total)` after every anchor iteration.
    pub fn with_progress(mut self, progress: impl FnMut(usize, usize) + 'c) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn build<'a>(&mut self, records: &'a [Record]) -> SearchOutcome<'a> {
        let mut outcome = SearchOutcome::empty();
        if records.len() < 2 {
            return outcome;
        }

        let total = records.len();
        let mut processed: HashSet<RecordId> = HashSet::new();

        for (idx, anchor) in records.iter().enumerate() {
            if self.is_cancelled() {
                warn!(
                    visited = idx,
                    total,
                    groups = outcome.groups.len(),
                    "duplicate search cancelled"
                );
                outcome.complete = false;
                break;
            }

            if !processed.contains(&anchor.id) {
                outcome.anchors_scanned += 1;
                self.scan_anchor(idx, records, &mut processed, &mut outcome);
            }

            if let Some(progress) = self.progress.as_mut() {
                progress(idx + 1, total);
            }
        }

        // Stable sort: ties keep discovery order.
        outcome
            .groups
            .sort_by(|a, b| b.match_score().total_cmp(&a.match_score()));

        info!(
            records = total,
            groups = outcome.groups.len(),
            comparisons = outcome.comparisons,
            discarded = outcome.discarded_oversized,
            complete = outcome.complete,
            "duplicate search finished"
        );
        outcome
    }

    fn scan_anchor<'a>(
        &self,
        anchor_idx: usize,
        records: &'a [Record],
        processed: &mut HashSet<RecordId>,
        outcome: &mut SearchOutcome<'a>,
    ) {
        let criteria = self.criteria;
        let anchor = &records[anchor_idx];
        let mut members: Vec<&'a Record> = vec![anchor];
        let mut match_fields = BTreeSet::new();

        for other in &records[anchor_idx + 1..] {
            if processed.contains(&other.id) {
                continue;
            }
            if !criteria.cross_list_search && other.list_id != anchor.list_id {
                continue;
            }

            outcome.comparisons += 1;
            let comparison = compare_records(anchor, other, criteria);
            if comparison.is_candidate {
                members.push(other);
                match_fields.extend(comparison.contributing_fields);
            }
        }

        if members.len() < 2 {
            return;
        }

        if members.len() > criteria.max_group_size {
            debug!(
                anchor = %anchor.id,
                size = members.len(),
                max = criteria.max_group_size,
                "discarding oversized candidate cluster"
            );
            outcome.discarded_oversized += 1;
            return;
        }

        for member in &members {
            processed.insert(member.id);
        }

        let match_score = chain_score(&members, criteria);
        outcome.comparisons += members.len() - 1;
        debug!(
            anchor = %anchor.id,
            size = members.len(),
            score = match_score,
            "finalized duplicate group"
        );
        outcome
            .groups
            .push(DuplicateGroup::new(members, match_score, match_fields));
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Mean aggregate score of each member paired with its predecessor in
/// cluster order.
fn chain_score(members: &[&Record], criteria: &SearchCriteria) -> f64 {
    let scores: Vec<f64> = members
        .windows(2)
        .map(|pair| compare_records(pair[0], pair[1], criteria).aggregate_score)
        .collect();

    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}
