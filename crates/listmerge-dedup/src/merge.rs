use std::collections::HashSet;

use listmerge_core::{CampaignEntry, MergeField, Record, RecordId, Tag};
use serde::Serialize;

use crate::group::DuplicateGroup;
use crate::{DedupError, Result};

/// Where a filled-in field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledField {
    pub field: MergeField,
    pub source: RecordId,
}

/// What the primary record would look like after absorbing its duplicates.
///
/// Derived on demand and never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub record: Record,
    pub primary_id: RecordId,
    /// Non-primary members folded into `record`, in cluster order.
    pub merged_from: Vec<RecordId>,
    pub filled_fields: Vec<FilledField>,
}

/// Computes the merged view of `group` around its primary record.
///
/// The primary keeps every non-empty scalar; empty ones take the first
/// non-empty value among the other members in cluster order. Tags and
/// campaigns are unioned by id, first seen wins.
pub fn preview_merge(group: &DuplicateGroup<'_>) -> Result<MergedRecord> {
    let primary = group.primary().ok_or_else(|| {
        DedupError::Precondition(format!("group {} has no primary record", group.id()))
    })?;

    let others: Vec<&Record> = group
        .records()
        .iter()
        .copied()
        .filter(|record| record.id != primary.id)
        .collect();

    let mut merged = primary.clone();
    let mut filled_fields = Vec::new();
    for field in MergeField::ALL {
        if let Some(source) = fill_field(&mut merged, field, &others) {
            filled_fields.push(FilledField { field, source });
        }
    }

    merged.tags = union_tags(primary, &others);
    merged.campaigns = union_campaigns(primary, &others);

    Ok(MergedRecord {
        record: merged,
        primary_id: primary.id,
        merged_from: others.iter().map(|record| record.id).collect(),
        filled_fields,
    })
}

/// Fills `field` on `target` when it is empty. Returns the donor's id.
fn fill_field(target: &mut Record, field: MergeField, others: &[&Record]) -> Option<RecordId> {
    match field {
        MergeField::FirstName => fill_text(&mut target.first_name, others, |r| &r.first_name),
        MergeField::LastName => fill_text(&mut target.last_name, others, |r| &r.last_name),
        MergeField::Address => fill_text(&mut target.address, others, |r| &r.address),
        MergeField::City => fill_text(&mut target.city, others, |r| &r.city),
        MergeField::State => fill_text(&mut target.state, others, |r| &r.state),
        MergeField::ZipCode => fill_text(&mut target.zip_code, others, |r| &r.zip_code),
        MergeField::Status => fill_option(&mut target.status, others, |r| r.status),
        MergeField::CreatedDate => {
            fill_option(&mut target.created_date, others, |r| r.created_date)
        }
        MergeField::CreatedBy => {
            fill_option_text(&mut target.created_by, others, |r| r.created_by.as_deref())
        }
        MergeField::ModifiedDate => {
            fill_option(&mut target.modified_date, others, |r| r.modified_date)
        }
        MergeField::ModifiedBy => {
            fill_option_text(&mut target.modified_by, others, |r| r.modified_by.as_deref())
        }
    }
}

fn fill_text(
    target: &mut String,
    others: &[&Record],
    get: impl Fn(&Record) -> &String,
) -> Option<RecordId> {
    if !target.trim().is_empty() {
        return None;
    }
    for &donor in others {
        let value = get(donor);
        if !value.trim().is_empty() {
            *target = value.clone();
            return Some(donor.id);
        }
    }
    None
}

fn fill_option_text(
    target: &mut Option<String>,
    others: &[&Record],
    get: impl Fn(&Record) -> Option<&str>,
) -> Option<RecordId> {
    if target.as_deref().is_some_and(|s| !s.trim().is_empty()) {
        return None;
    }
    for &donor in others {
        if let Some(value) = get(donor).filter(|s| !s.trim().is_empty()) {
            *target = Some(value.to_string());
            return Some(donor.id);
        }
    }
    None
}

fn fill_option<T: Copy>(
    target: &mut Option<T>,
    others: &[&Record],
    get: impl Fn(&Record) -> Option<T>,
) -> Option<RecordId> {
    if target.is_some() {
        return None;
    }
    for &donor in others {
        if let Some(value) = get(donor) {
            *target = Some(value);
            return Some(donor.id);
        }
    }
    None
}

fn union_tags(primary: &Record, others: &[&Record]) -> Vec<Tag> {
    let mut seen = HashSet::new();
    std::iter::once(primary)
        .chain(others.iter().copied())
        .flat_map(|record| record.tags.iter())
        .filter(|tag| seen.insert(tag.id))
        .cloned()
        .collect()
}

fn union_campaigns(primary: &Record, others: &[&Record]) -> Vec<CampaignEntry> {
    let mut seen = HashSet::new();
    std::iter::once(primary)
        .chain(others.iter().copied())
        .flat_map(|record| record.campaigns.iter())
        .filter(|campaign| seen.insert(campaign.id))
        .cloned()
        .collect()
}
