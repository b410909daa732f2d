//! Backend Endpoints
//!
//! The store talks to the platform through these traits rather than through
//! [`ApiClient`](super::ApiClient) directly. Each state slice only asks for
//! the endpoint group it uses, so a test double for the comment thread does
//! not have to pretend to be a notification server.
//!
//! [`Backend`] is the union of every group and is implemented automatically
//! for any type that provides all of them.

use crate::shared::error::ClientError;
use crate::shared::models::{
    AuthSession, Category, Channel, Comment, CommentEngagement, Credentials, EngagementAction,
    Notification, Registration, SearchResults, User, Video, VideoPage, VideoUpload,
};
use serde::Serialize;
use std::future::Future;

/// Sort direction for video listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filters for `GET /videos`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoQuery {
    /// Free-text title/description filter
    pub search: Option<String>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    /// Only videos owned by this user
    pub user_id: Option<String>,
}

impl Default for VideoQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort_by: "createdAt".to_string(),
            sort_order: SortOrder::Desc,
            user_id: None,
        }
    }
}

/// Filters for `GET /recommendations`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationQuery {
    pub category: Option<String>,
    /// Video being watched, excluded from its own suggestions
    pub current_video_id: Option<String>,
}

/// Viewer activity reported to the recommendation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewAction {
    View,
    Like,
    Dislike,
    /// Watched for `duration` seconds
    Watch { duration: u64 },
}

impl From<EngagementAction> for ViewAction {
    fn from(action: EngagementAction) -> Self {
        match action {
            EngagementAction::Like => ViewAction::Like,
            EngagementAction::Dislike => ViewAction::Dislike,
        }
    }
}

pub trait AuthBackend: Send + Sync {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthSession, ClientError>> + Send;

    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<AuthSession, ClientError>> + Send;

    fn current_user(&self) -> impl Future<Output = Result<User, ClientError>> + Send;

    fn refresh_token(&self) -> impl Future<Output = Result<AuthSession, ClientError>> + Send;

    /// Drop any stored access token
    fn forget_credentials(&self);
}

pub trait VideoBackend: Send + Sync {
    fn list_videos(
        &self,
        query: &VideoQuery,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<VideoPage, ClientError>> + Send;

    fn get_video(&self, video_id: &str) -> impl Future<Output = Result<Video, ClientError>> + Send;

    fn publish_video(
        &self,
        upload: &VideoUpload,
    ) -> impl Future<Output = Result<Video, ClientError>> + Send;

    /// Toggle like/dislike; the server answers with the updated video
    fn react_to_video(
        &self,
        video_id: &str,
        action: EngagementAction,
    ) -> impl Future<Output = Result<Video, ClientError>> + Send;
}

pub trait CommentBackend: Send + Sync {
    fn list_comments(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Vec<Comment>, ClientError>> + Send;

    fn add_comment(
        &self,
        video_id: &str,
        content: &str,
    ) -> impl Future<Output = Result<Comment, ClientError>> + Send;

    fn update_comment(
        &self,
        comment_id: &str,
        content: &str,
    ) -> impl Future<Output = Result<Comment, ClientError>> + Send;

    fn delete_comment(&self, comment_id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn react_to_comment(
        &self,
        comment_id: &str,
        action: EngagementAction,
    ) -> impl Future<Output = Result<CommentEngagement, ClientError>> + Send;
}

pub trait RecommendationBackend: Send + Sync {
    fn recommendations(
        &self,
        query: &RecommendationQuery,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<VideoPage, ClientError>> + Send;

    fn track(
        &self,
        video_id: &str,
        action: ViewAction,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

pub trait NotificationBackend: Send + Sync {
    fn notifications(&self) -> impl Future<Output = Result<Vec<Notification>, ClientError>> + Send;

    fn mark_notification_read(
        &self,
        notification_id: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn mark_all_notifications_read(&self) -> impl Future<Output = Result<(), ClientError>> + Send;
}

pub trait DiscoveryBackend: Send + Sync {
    fn search(&self, query: &str) -> impl Future<Output = Result<SearchResults, ClientError>> + Send;

    fn categories(&self) -> impl Future<Output = Result<Vec<Category>, ClientError>> + Send;

    fn channel(&self, username: &str) -> impl Future<Output = Result<Channel, ClientError>> + Send;

    fn toggle_subscription(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Every endpoint group the store needs
pub trait Backend:
    AuthBackend
    + VideoBackend
    + CommentBackend
    + RecommendationBackend
    + NotificationBackend
    + DiscoveryBackend
{
}

impl<T> Backend for T where
    T: AuthBackend
        + VideoBackend
        + CommentBackend
        + RecommendationBackend
        + NotificationBackend
        + DiscoveryBackend
{
}
