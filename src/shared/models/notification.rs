//! Notification feed entries

use super::{nullable, owner_summary, reference_id, ChannelSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, alias = "message", deserialize_with = "nullable")]
    pub content: String,
    /// Backend event type, e.g. `LIKE`, `COMMENT`, `SUBSCRIBE`
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "reference_id")]
    pub video: Option<String>,
    #[serde(default, deserialize_with = "owner_summary")]
    pub sender: Option<ChannelSummary>,
}
