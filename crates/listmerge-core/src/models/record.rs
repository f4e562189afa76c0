use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CampaignEntry, RecordStatus, Tag};

pub type RecordId = Uuid;
pub type ListId = Uuid;

/// A contact on a mailing list, as exported by the record store.
///
/// Text fields use the empty string for "absent".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub zip_code: String,

    pub list_id: ListId,

    #[serde(default)]
    pub list_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub campaigns: Vec<CampaignEntry>,
}

impl Record {
    pub fn new(id: RecordId, list_id: ListId) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            list_id,
            list_name: String::new(),
            status: None,
            created_date: None,
            created_by: None,
            modified_date: None,
            modified_by: None,
            tags: Vec::new(),
            campaigns: Vec::new(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
