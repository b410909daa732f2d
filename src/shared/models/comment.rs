//! Comment data structures

use super::{nullable, ChannelSummary, Engagement, OwnerRef, Reference};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawComment", into = "RawComment")]
pub struct Comment {
    pub id: String,
    pub content: String,
    /// Parent video id
    pub video: Option<String>,
    pub owner: Option<ChannelSummary>,
    pub created_at: Option<DateTime<Utc>>,
    pub engagement: Engagement,
}

impl Comment {
    /// Whether `user_id` wrote this comment
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner.as_ref().is_some_and(|owner| owner.id == user_id)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComment {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, deserialize_with = "nullable")]
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<OwnerRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "likeCount", deserialize_with = "nullable")]
    likes_count: i64,
    #[serde(default, alias = "dislikeCount", deserialize_with = "nullable")]
    dislikes_count: i64,
    #[serde(default, deserialize_with = "nullable")]
    is_liked: bool,
    #[serde(default, deserialize_with = "nullable")]
    is_disliked: bool,
}

impl From<RawComment> for Comment {
    fn from(raw: RawComment) -> Self {
        Self {
            engagement: Engagement::from_flags(
                raw.is_liked,
                raw.is_disliked,
                raw.likes_count,
                raw.dislikes_count,
            ),
            id: raw.id,
            content: raw.content,
            video: raw.video.map(Reference::into_id),
            owner: raw.owner.map(ChannelSummary::from),
            created_at: raw.created_at,
        }
    }
}

impl From<Comment> for RawComment {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            video: comment.video.map(Reference::Id),
            owner: comment.owner.map(OwnerRef::Summary),
            created_at: comment.created_at,
            likes_count: comment.engagement.likes as i64,
            dislikes_count: comment.engagement.dislikes as i64,
            is_liked: comment.engagement.is_liked(),
            is_disliked: comment.engagement.is_disliked(),
        }
    }
}

/// Body of a comment like/dislike response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEngagement {
    pub comment_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub is_liked: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub is_disliked: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub likes_count: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub dislikes_count: i64,
}

impl CommentEngagement {
    pub fn engagement(&self) -> Engagement {
        Engagement::from_flags(
            self.is_liked,
            self.is_disliked,
            self.likes_count,
            self.dislikes_count,
        )
    }
}
