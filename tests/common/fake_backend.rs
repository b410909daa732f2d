//! Scripted in-memory backend
//!
//! Implements every endpoint trait over plain vectors. Each call is recorded,
//! yields once to the runtime (so concurrent callers interleave the way real
//! requests do), can be held at a gate until the test releases it, and can
//! be made to fail.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use vidtube::client::{
    AuthBackend, CommentBackend, DiscoveryBackend, NotificationBackend, RecommendationBackend,
    RecommendationQuery, VideoBackend, VideoQuery, ViewAction,
};
use vidtube::shared::models::{
    AuthSession, Category, Channel, Comment, CommentEngagement, Credentials, EngagementAction,
    Notification, Registration, SearchResults, User, Video, VideoPage, VideoUpload,
};
use vidtube::shared::ClientError;

pub const LIST_VIDEOS: &str = "list_videos";
pub const GET_VIDEO: &str = "get_video";
pub const PUBLISH_VIDEO: &str = "publish_video";
pub const REACT_TO_VIDEO: &str = "react_to_video";
pub const LIST_COMMENTS: &str = "list_comments";
pub const ADD_COMMENT: &str = "add_comment";
pub const UPDATE_COMMENT: &str = "update_comment";
pub const DELETE_COMMENT: &str = "delete_comment";
pub const REACT_TO_COMMENT: &str = "react_to_comment";
pub const RECOMMENDATIONS: &str = "recommendations";
pub const TRACK: &str = "track";
pub const NOTIFICATIONS: &str = "notifications";
pub const MARK_READ: &str = "mark_notification_read";
pub const MARK_ALL_READ: &str = "mark_all_notifications_read";
pub const SEARCH: &str = "search";
pub const CATEGORIES: &str = "categories";
pub const CHANNEL: &str = "channel";
pub const TOGGLE_SUBSCRIPTION: &str = "toggle_subscription";
pub const LOGIN: &str = "login";
pub const REGISTER: &str = "register";
pub const CURRENT_USER: &str = "current_user";
pub const REFRESH_TOKEN: &str = "refresh_token";

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub endpoint: &'static str,
    pub arg: String,
}

#[derive(Default)]
pub struct FakeBackend {
    pub videos: Mutex<Vec<Video>>,
    pub recommended: Mutex<Vec<Video>>,
    pub comments: Mutex<Vec<Comment>>,
    pub notifications: Mutex<Vec<Notification>>,
    pub channels: Mutex<Vec<Channel>>,
    pub categories: Mutex<Vec<Category>>,
    /// Account returned by login/current_user
    pub account: Mutex<Option<User>>,
    /// When set, current_user answers 401 until a refresh succeeds
    pub token_expired: Mutex<bool>,
    pub refresh_allowed: Mutex<bool>,
    pub tracked: Mutex<Vec<(String, ViewAction)>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, ClientError>>,
    gates: Mutex<HashMap<&'static str, Arc<Notify>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_videos(videos: Vec<Video>) -> Self {
        let backend = Self::default();
        *backend.videos.lock().unwrap() = videos;
        backend
    }

    pub fn with_account(self, user: User) -> Self {
        *self.account.lock().unwrap() = Some(user);
        self
    }

    /// Every later call to `endpoint` fails with `error`
    pub fn fail(&self, endpoint: &'static str, error: ClientError) {
        self.failures.lock().unwrap().insert(endpoint, error);
    }

    pub fn succeed(&self, endpoint: &'static str) {
        self.failures.lock().unwrap().remove(endpoint);
    }

    /// Calls to `endpoint` wait until the returned handle is notified
    pub fn hold(&self, endpoint: &'static str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(endpoint, gate.clone());
        gate
    }

    pub fn calls(&self, endpoint: &str) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .cloned()
            .collect()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls(endpoint).len()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn enter(&self, endpoint: &'static str, arg: impl Into<String>) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(Call {
            endpoint,
            arg: arg.into(),
        });
        let gate = self.gates.lock().unwrap().get(endpoint).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        tokio::task::yield_now().await;
        let failure = self.failures.lock().unwrap().get(endpoint).cloned();
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn not_found(what: &str) -> ClientError {
        ClientError::server(404, format!("{what} not found"))
    }
}

fn page_of(all: &[Video], page: u32, limit: u32) -> VideoPage {
    let limit = limit.max(1) as usize;
    let start = (page.saturating_sub(1) as usize) * limit;
    let videos: Vec<Video> = all.iter().skip(start).take(limit).cloned().collect();
    VideoPage {
        videos,
        total_videos: all.len() as u64,
        total_pages: all.len().div_ceil(limit) as u32,
        current_page: Some(page),
    }
}

impl AuthBackend for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        let who = credentials.email.clone().unwrap_or_default();
        self.enter(LOGIN, who).await?;
        let user = self.account.lock().unwrap().clone();
        match user {
            Some(user) => {
                *self.token_expired.lock().unwrap() = false;
                Ok(AuthSession {
                    user: Some(user),
                    access_token: Some("token".to_string()),
                    refresh_token: Some("refresh".to_string()),
                })
            }
            None => Err(ClientError::server(401, "Invalid credentials")),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSession, ClientError> {
        self.enter(REGISTER, registration.username.clone()).await?;
        let user = User {
            id: format!("id_{}", registration.username),
            username: registration.username.clone(),
            email: registration.email.clone(),
            full_name: registration.full_name.clone(),
            avatar: String::new(),
            cover_image: String::new(),
        };
        *self.account.lock().unwrap() = Some(user.clone());
        Ok(AuthSession {
            user: Some(user),
            access_token: None,
            refresh_token: None,
        })
    }

    async fn current_user(&self) -> Result<User, ClientError> {
        self.enter(CURRENT_USER, "").await?;
        if *self.token_expired.lock().unwrap() {
            return Err(ClientError::server(401, "jwt expired"));
        }
        let user = self.account.lock().unwrap().clone();
        user.ok_or_else(|| ClientError::server(401, "Unauthorized request"))
    }

    async fn refresh_token(&self) -> Result<AuthSession, ClientError> {
        self.enter(REFRESH_TOKEN, "").await?;
        if !*self.refresh_allowed.lock().unwrap() {
            return Err(ClientError::server(401, "Refresh token is expired or used"));
        }
        *self.token_expired.lock().unwrap() = false;
        Ok(AuthSession {
            user: None,
            access_token: Some("fresh".to_string()),
            refresh_token: Some("refresh".to_string()),
        })
    }

    fn forget_credentials(&self) {}
}

impl VideoBackend for FakeBackend {
    async fn list_videos(
        &self,
        query: &VideoQuery,
        page: u32,
        limit: u32,
    ) -> Result<VideoPage, ClientError> {
        self.enter(LIST_VIDEOS, format!("page={page}")).await?;
        let all: Vec<Video> = self
            .videos
            .lock()
            .unwrap()
            .iter()
            .filter(|v| match &query.search {
                Some(search) => v.title.contains(search.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        Ok(page_of(&all, page, limit))
    }

    async fn get_video(&self, video_id: &str) -> Result<Video, ClientError> {
        self.enter(GET_VIDEO, video_id).await?;
        let found = self.videos.lock().unwrap().iter().find(|v| v.id == video_id).cloned();
        found.ok_or_else(|| Self::not_found("Video"))
    }

    async fn publish_video(&self, upload: &VideoUpload) -> Result<Video, ClientError> {
        self.enter(PUBLISH_VIDEO, upload.title.clone()).await?;
        let mut videos = self.videos.lock().unwrap();
        let mut video = super::fixtures::video(&format!("new{}", videos.len() + 1));
        video.title = upload.title.clone();
        video.description = upload.description.clone();
        videos.insert(0, video.clone());
        Ok(video)
    }

    async fn react_to_video(
        &self,
        video_id: &str,
        action: EngagementAction,
    ) -> Result<Video, ClientError> {
        self.enter(REACT_TO_VIDEO, format!("{video_id}/{}", action.as_path()))
            .await?;
        let mut videos = self.videos.lock().unwrap();
        let video = videos
            .iter_mut()
            .find(|v| v.id == video_id)
            .ok_or_else(|| Self::not_found("Video"))?;
        video.engagement = video.engagement.toggled(action);
        Ok(video.clone())
    }
}

impl CommentBackend for FakeBackend {
    async fn list_comments(&self, video_id: &str) -> Result<Vec<Comment>, ClientError> {
        self.enter(LIST_COMMENTS, video_id).await?;
        Ok(self.comments.lock().unwrap().clone())
    }

    async fn add_comment(&self, video_id: &str, content: &str) -> Result<Comment, ClientError> {
        self.enter(ADD_COMMENT, content).await?;
        let owner = self.account.lock().unwrap().clone();
        let mut comments = self.comments.lock().unwrap();
        let comment = Comment {
            id: format!("c{}", comments.len() + 100),
            content: content.to_string(),
            video: Some(video_id.to_string()),
            owner: owner.map(|u| super::fixtures::summary(&u.id)),
            created_at: None,
            engagement: Default::default(),
        };
        comments.insert(0, comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment, ClientError> {
        self.enter(UPDATE_COMMENT, format!("{comment_id}:{content}"))
            .await?;
        let mut comments = self.comments.lock().unwrap();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| Self::not_found("Comment"))?;
        comment.content = content.to_string();
        Ok(comment.clone())
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), ClientError> {
        self.enter(DELETE_COMMENT, comment_id).await?;
        self.comments.lock().unwrap().retain(|c| c.id != comment_id);
        Ok(())
    }

    async fn react_to_comment(
        &self,
        comment_id: &str,
        action: EngagementAction,
    ) -> Result<CommentEngagement, ClientError> {
        self.enter(REACT_TO_COMMENT, format!("{comment_id}/{}", action.as_path()))
            .await?;
        let mut comments = self.comments.lock().unwrap();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| Self::not_found("Comment"))?;
        comment.engagement = comment.engagement.toggled(action);
        let engagement = comment.engagement;
        Ok(CommentEngagement {
            comment_id: comment_id.to_string(),
            is_liked: engagement.is_liked(),
            is_disliked: engagement.is_disliked(),
            likes_count: engagement.likes as i64,
            dislikes_count: engagement.dislikes as i64,
        })
    }
}

impl RecommendationBackend for FakeBackend {
    async fn recommendations(
        &self,
        query: &RecommendationQuery,
        page: u32,
        limit: u32,
    ) -> Result<VideoPage, ClientError> {
        let arg = format!(
            "page={page};category={};exclude={}",
            query.category.as_deref().unwrap_or("-"),
            query.current_video_id.as_deref().unwrap_or("-"),
        );
        self.enter(RECOMMENDATIONS, arg).await?;
        let all: Vec<Video> = self
            .recommended
            .lock()
            .unwrap()
            .iter()
            .filter(|v| query.category.is_none() || v.category == query.category)
            .filter(|v| query.current_video_id.as_deref() != Some(v.id.as_str()))
            .cloned()
            .collect();
        Ok(page_of(&all, page, limit))
    }

    async fn track(&self, video_id: &str, action: ViewAction) -> Result<(), ClientError> {
        self.enter(TRACK, video_id).await?;
        self.tracked
            .lock()
            .unwrap()
            .push((video_id.to_string(), action));
        Ok(())
    }
}

impl NotificationBackend for FakeBackend {
    async fn notifications(&self) -> Result<Vec<Notification>, ClientError> {
        self.enter(NOTIFICATIONS, "").await?;
        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn mark_notification_read(&self, notification_id: &str) -> Result<(), ClientError> {
        self.enter(MARK_READ, notification_id).await?;
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> Result<(), ClientError> {
        self.enter(MARK_ALL_READ, "").await
    }
}

impl DiscoveryBackend for FakeBackend {
    async fn search(&self, query: &str) -> Result<SearchResults, ClientError> {
        self.enter(SEARCH, query).await?;
        let videos = self
            .videos
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.title.contains(query))
            .cloned()
            .collect();
        let channels = self
            .channels
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.username.contains(query))
            .cloned()
            .collect();
        Ok(SearchResults { channels, videos })
    }

    async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.enter(CATEGORIES, "").await?;
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn channel(&self, username: &str) -> Result<Channel, ClientError> {
        self.enter(CHANNEL, username).await?;
        let found = self
            .channels
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.username == username)
            .cloned();
        found.ok_or_else(|| Self::not_found("Channel"))
    }

    async fn toggle_subscription(&self, channel_id: &str) -> Result<(), ClientError> {
        self.enter(TOGGLE_SUBSCRIPTION, channel_id).await
    }
}
