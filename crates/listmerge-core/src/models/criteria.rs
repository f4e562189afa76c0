use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ComparableField;

/// Configuration for one duplicate search.
///
/// Built once per search and handed to the engine by shared reference; the
/// engine never changes it mid-scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Fields compared between record pairs. Must not be empty.
    pub fields: BTreeSet<ComparableField>,
    /// Similarity cutoff in `0..=100`. Ignored in exact-match mode.
    pub threshold: u8,
    pub case_sensitive: bool,
    pub ignore_spaces: bool,
    pub exact_match: bool,
    /// When false, only records sharing a `list_id` are compared.
    pub cross_list_search: bool,
    /// Largest cluster that may be emitted. Larger clusters are discarded.
    pub max_group_size: usize,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            fields: [
                ComparableField::FirstName,
                ComparableField::LastName,
                ComparableField::Address,
                ComparableField::ZipCode,
            ]
            .into_iter()
            .collect(),
            threshold: 80,
            case_sensitive: false,
            ignore_spaces: true,
            exact_match: false,
            cross_list_search: false,
            max_group_size: 5,
        }
    }
}

impl SearchCriteria {
    pub fn new(fields: impl IntoIterator<Item = ComparableField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_group_size(mut self, max_group_size: usize) -> Self {
        self.max_group_size = max_group_size;
        self
    }

    pub fn exact(mut self, exact_match: bool) -> Self {
        self.exact_match = exact_match;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn ignore_spaces(mut self, ignore_spaces: bool) -> Self {
        self.ignore_spaces = ignore_spaces;
        self
    }

    pub fn cross_list(mut self, cross_list_search: bool) -> Self {
        self.cross_list_search = cross_list_search;
        self
    }
}
