use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CampaignId = Uuid;

/// One entry in a record's mailing history. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignEntry {
    pub id: CampaignId,

    #[serde(default)]
    pub order_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailed_date: Option<DateTime<Utc>>,
}

impl CampaignEntry {
    pub fn new(id: CampaignId, order_id: impl Into<String>) -> Self {
        Self {
            id,
            order_id: order_id.into(),
            mailed_date: None,
        }
    }
}
