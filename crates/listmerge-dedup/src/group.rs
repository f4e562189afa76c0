use std::collections::BTreeSet;

use listmerge_core::{ComparableField, Record, RecordId};
use serde::Serialize;
use uuid::Uuid;

use crate::{DedupError, Result};

pub type GroupId = Uuid;

/// A cluster of records judged to be the same contact.
///
/// Members borrow the caller's records. Score and fields are fixed when the
/// cluster builder emits the group; only the primary can change afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup<'a> {
    id: GroupId,
    records: Vec<&'a Record>,
    match_score: f64,
    match_fields: BTreeSet<ComparableField>,
    primary_record_id: Option<RecordId>,
}

impl<'a> DuplicateGroup<'a> {
    /// Builds a group with the first record as primary.
    pub(crate) fn new(
        records: Vec<&'a Record>,
        match_score: f64,
        match_fields: BTreeSet<ComparableField>,
    ) -> Self {
        let primary_record_id = records.first().map(|record| record.id);
        Self {
            id: Uuid::now_v7(),
            records,
            match_score,
            match_fields,
            primary_record_id,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Members in discovery order; the anchor comes first.
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn match_score(&self) -> f64 {
        self.match_score
    }

    pub fn match_fields(&self) -> &BTreeSet<ComparableField> {
        &self.match_fields
    }

    pub fn primary_record_id(&self) -> Option<RecordId> {
        self.primary_record_id
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    pub fn record(&self, id: RecordId) -> Option<&'a Record> {
        self.records.iter().copied().find(|record| record.id == id)
    }

    /// The chosen primary record, if one is set.
    pub fn primary(&self) -> Option<&'a Record> {
        self.primary_record_id.and_then(|id| self.record(id))
    }

    /// Ids of every member except the primary, in cluster order.
    pub fn non_primary_ids(&self) -> Vec<RecordId> {
        self.records
            .iter()
            .map(|record| record.id)
            .filter(|id| Some(*id) != self.primary_record_id)
            .collect()
    }

    /// Designates `id` as primary. Fails without changes when `id` is not a member.
    pub fn set_primary(&mut self, id: RecordId) -> Result<()> {
        if !self.contains(id) {
            return Err(DedupError::Precondition(format!(
                "record {id} is not a member of group {}",
                self.id
            )));
        }
        self.primary_record_id = Some(id);
        Ok(())
    }

    pub fn clear_primary(&mut self) {
        self.primary_record_id = None;
    }
}
