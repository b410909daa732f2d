//! Wire Models
//!
//! Typed schemas for every payload the backend returns. Server payloads are
//! loosely typed (optional fields, `null`s, ids that are sometimes populated
//! objects), so each schema carries its defaulting rules and is validated
//! once here at ingestion rather than at every read site.
//!
//! - `envelope` - the `{ statusCode, data, message }` wrapper and error body
//! - `engagement` - the like/dislike state machine
//! - `video`, `comment` - the two engageable items
//! - `user` - users, channels and auth payloads
//! - `notification` - notification feed entries
//! - `catalog` - categories, search results and video pages

pub mod catalog;
pub mod comment;
pub mod engagement;
pub mod envelope;
pub mod notification;
pub mod user;
pub mod video;

pub use catalog::{Category, SearchResults, VideoPage, ALL_CATEGORIES};
pub use comment::{Comment, CommentEngagement};
pub use engagement::{Engagement, EngagementAction, Reaction};
pub use envelope::{ApiResponse, ErrorBody};
pub use notification::Notification;
pub use user::{AuthSession, Channel, ChannelSummary, Credentials, Registration, User};
pub use video::{Video, VideoUpload};

use serde::{Deserialize, Deserializer, Serialize};

/// A related resource the backend sends either as a bare id or populated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum Reference {
    Id(String),
    Object {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl Reference {
    pub(crate) fn into_id(self) -> String {
        match self {
            Reference::Id(id) | Reference::Object { id } => id,
        }
    }
}

/// An owner/sender reference; populated objects keep their profile fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum OwnerRef {
    Id(String),
    Summary(ChannelSummary),
}

impl From<OwnerRef> for ChannelSummary {
    fn from(owner: OwnerRef) -> Self {
        match owner {
            OwnerRef::Id(id) => ChannelSummary {
                id,
                ..ChannelSummary::default()
            },
            OwnerRef::Summary(summary) => summary,
        }
    }
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn reference_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Reference>::deserialize(deserializer).map(|r| r.map(Reference::into_id))
}

pub(crate) fn owner_summary<'de, D>(deserializer: D) -> Result<Option<ChannelSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<OwnerRef>::deserialize(deserializer).map(|o| o.map(ChannelSummary::from))
}

pub(crate) fn default_true() -> bool {
    true
}
