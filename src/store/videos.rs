//! Video slice: the browse feed plus the video currently being watched.

use super::engagement::{toggle_optimistically, EngagementLedger, EngagementTarget};
use super::pagination::{FeedSnapshot, LoadOutcome, PagedFeed, VideoPages};
use super::session::CurrentUser;
use crate::client::{RecommendationBackend, VideoBackend, VideoQuery, ViewAction};
use crate::shared::error::ClientError;
use crate::shared::models::{Engagement, EngagementAction, Video, VideoUpload};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// The video on the watch page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentVideo {
    pub video: Option<Video>,
    pub loading: bool,
    pub error: Option<ClientError>,
}

impl EngagementTarget for CurrentVideo {
    fn engagement_of(&mut self, id: &str) -> Option<&mut Engagement> {
        self.video
            .as_mut()
            .filter(|video| video.id == id)
            .map(|video| &mut video.engagement)
    }
}

/// Slice-wide error status, separate from the feed's own fetch error
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoStatus {
    pub error: Option<ClientError>,
    pub network_error: bool,
}

pub struct VideoSlice<B> {
    backend: Arc<B>,
    actor: CurrentUser,
    feed: PagedFeed<Video, VideoQuery, VideoPages<B>>,
    current: RwLock<CurrentVideo>,
    status: RwLock<VideoStatus>,
    ledger: EngagementLedger,
}

impl<B> VideoSlice<B>
where
    B: VideoBackend + RecommendationBackend,
{
    pub fn new(backend: Arc<B>, actor: CurrentUser, page_size: u32) -> Self {
        Self {
            feed: PagedFeed::new(VideoPages(backend.clone()), page_size, VideoQuery::default()),
            backend,
            actor,
            current: RwLock::new(CurrentVideo::default()),
            status: RwLock::new(VideoStatus::default()),
            ledger: EngagementLedger::default(),
        }
    }

    pub async fn load_next_page(&self) -> Result<LoadOutcome, ClientError> {
        let outcome = self.feed.load_next_page().await;
        if let Err(err) = &outcome {
            self.record(err).await;
        }
        outcome
    }

    pub async fn on_near_end(&self, last_visible: usize) -> Result<LoadOutcome, ClientError> {
        let outcome = self.feed.on_near_end(last_visible).await;
        if let Err(err) = &outcome {
            self.record(err).await;
        }
        outcome
    }

    /// Replace the feed filters and start from page one
    pub async fn set_query(&self, query: VideoQuery) {
        self.feed.reset(query).await;
    }

    pub async fn detach(&self) {
        self.feed.detach().await;
    }

    pub async fn feed(&self) -> FeedSnapshot<Video> {
        self.feed.snapshot().await
    }

    pub async fn current(&self) -> CurrentVideo {
        self.current.read().await.clone()
    }

    pub async fn status(&self) -> VideoStatus {
        self.status.read().await.clone()
    }

    pub async fn open_video(&self, video_id: &str) -> Result<Video, ClientError> {
        {
            let mut current = self.current.write().await;
            current.loading = true;
            current.error = None;
        }

        let result = self.backend.get_video(video_id).await;

        let mut current = self.current.write().await;
        current.loading = false;
        match result {
            Ok(video) => {
                current.video = Some(video.clone());
                Ok(video)
            }
            Err(err) => {
                error!("Failed to load video {}: {}", video_id, err);
                current.video = None;
                current.error = Some(err.clone());
                drop(current);
                self.record(&err).await;
                Err(err)
            }
        }
    }

    /// Like/dislike a video in the feed
    pub async fn toggle_feed(
        &self,
        video_id: &str,
        action: EngagementAction,
    ) -> Result<Engagement, ClientError> {
        self.actor.require().await?;
        let result = toggle_optimistically(
            self.feed.state(),
            &self.ledger,
            video_id,
            action,
            self.backend.react_to_video(video_id, action),
            |video: Video| video.engagement,
        )
        .await;
        self.after_toggle(video_id, action, result).await
    }

    /// Like/dislike the video being watched
    pub async fn toggle_current(
        &self,
        video_id: &str,
        action: EngagementAction,
    ) -> Result<Engagement, ClientError> {
        self.actor.require().await?;
        let result = toggle_optimistically(
            &self.current,
            &self.ledger,
            video_id,
            action,
            self.backend.react_to_video(video_id, action),
            |video: Video| video.engagement,
        )
        .await;
        if let Ok(engagement) = &result {
            if let Some(copy) = self.feed.state().write().await.find_mut(video_id) {
                copy.engagement = *engagement;
            }
        }
        self.after_toggle(video_id, action, result).await
    }

    async fn after_toggle(
        &self,
        video_id: &str,
        action: EngagementAction,
        result: Result<Engagement, ClientError>,
    ) -> Result<Engagement, ClientError> {
        match &result {
            Ok(_) => {
                if let Err(err) = self.backend.track(video_id, ViewAction::from(action)).await {
                    warn!("Could not report {} on {}: {}", action.as_path(), video_id, err);
                }
            }
            Err(err) => self.record(err).await,
        }
        result
    }

    /// Validate and upload; the new video goes to the top of the feed
    pub async fn publish(&self, upload: &VideoUpload) -> Result<Video, ClientError> {
        self.actor.require().await?;
        upload.validate()?;

        match self.backend.publish_video(upload).await {
            Ok(video) => {
                info!("Published video {}", video.id);
                self.feed.state().write().await.prepend(video.clone());
                Ok(video)
            }
            Err(err) => {
                error!("Upload failed: {}", err);
                self.record(&err).await;
                Err(err)
            }
        }
    }

    pub async fn clear_network_error(&self) {
        *self.status.write().await = VideoStatus::default();
        self.feed.state().write().await.clear_error();
    }

    async fn record(&self, err: &ClientError) {
        let mut status = self.status.write().await;
        status.network_error = err.is_network();
        status.error = Some(err.clone());
    }
}
