//! Listing payloads: video pages, categories and search results

use super::{nullable, Channel, Video};
use serde::{Deserialize, Serialize};

/// Id of the synthetic "every category" entry
pub const ALL_CATEGORIES: &str = "all";

/// One page of a video listing or recommendation feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPage {
    #[serde(default, deserialize_with = "nullable")]
    pub videos: Vec<Video>,
    #[serde(default, deserialize_with = "nullable")]
    pub total_videos: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

impl Category {
    /// The "All" filter that clears category selection
    pub fn all() -> Self {
        Self {
            id: ALL_CATEGORIES.to_string(),
            name: "All".to_string(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.id == ALL_CATEGORIES
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "nullable")]
    pub channels: Vec<Channel>,
    #[serde(default, deserialize_with = "nullable")]
    pub videos: Vec<Video>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() && self.videos.is_empty()
    }
}
