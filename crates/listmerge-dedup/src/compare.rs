use std::collections::BTreeSet;

use listmerge_core::{ComparableField, Record, SearchCriteria};
use serde::Serialize;

use crate::normalize::normalize_for;
use crate::similarity::{exact_match, similarity_score};

/// Outcome for one selected field of a record pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldVerdict {
    pub field: ComparableField,
    /// `None` when the field was empty on either side and therefore skipped.
    pub score: Option<u8>,
    pub matched: bool,
}

/// Result of comparing two records under one set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairComparison {
    pub is_candidate: bool,
    pub contributing_fields: BTreeSet<ComparableField>,
    /// Mean score of the contributing fields, 0 when none contributed.
    pub aggregate_score: f64,
    pub verdicts: Vec<FieldVerdict>,
}

/// Compares `left` and `right` field by field.
///
/// A field empty on either side is skipped and can neither match nor move the
/// aggregate. The aggregate averages contributing fields only.
pub fn compare_records(
    left: &Record,
    right: &Record,
    criteria: &SearchCriteria,
) -> PairComparison {
    let mut contributing_fields = BTreeSet::new();
    let mut verdicts = Vec::with_capacity(criteria.fields.len());
    let mut score_sum = 0u32;

    for &field in &criteria.fields {
        let a = normalize_for(field.value(left), criteria);
        let b = normalize_for(field.value(right), criteria);

        if a.is_empty() || b.is_empty() {
            verdicts.push(FieldVerdict {
                field,
                score: None,
                matched: false,
            });
            continue;
        }

        let (score, matched) = if criteria.exact_match {
            let equal = exact_match(&a, &b);
            (if equal { 100 } else { 0 }, equal)
        } else {
            let score = similarity_score(&a, &b);
            (score, score >= criteria.threshold)
        };

        if matched {
            contributing_fields.insert(field);
            score_sum += u32::from(score);
        }
        verdicts.push(FieldVerdict {
            field,
            score: Some(score),
            matched,
        });
    }

    let aggregate_score = if contributing_fields.is_empty() {
        0.0
    } else {
        f64::from(score_sum) / contributing_fields.len() as f64
    };

    PairComparison {
        is_candidate: !contributing_fields.is_empty(),
        contributing_fields,
        aggregate_score,
        verdicts,
    }
}
