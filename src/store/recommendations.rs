//! Recommendation feed and viewer-activity tracking.

use super::pagination::{FeedSnapshot, LoadOutcome, PagedFeed, RecommendationPages};
use crate::client::{RecommendationBackend, RecommendationQuery, ViewAction};
use crate::shared::error::ClientError;
use crate::shared::models::{Video, ALL_CATEGORIES};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct RecommendationSlice<B> {
    backend: Arc<B>,
    feed: PagedFeed<Video, RecommendationQuery, RecommendationPages<B>>,
}

impl<B: RecommendationBackend> RecommendationSlice<B> {
    pub fn new(backend: Arc<B>, page_size: u32) -> Self {
        Self {
            feed: PagedFeed::new(
                RecommendationPages(backend.clone()),
                page_size,
                RecommendationQuery::default(),
            ),
            backend,
        }
    }

    pub async fn load_next_page(&self) -> Result<LoadOutcome, ClientError> {
        self.feed.load_next_page().await
    }

    pub async fn on_near_end(&self, last_visible: usize) -> Result<LoadOutcome, ClientError> {
        self.feed.on_near_end(last_visible).await
    }

    /// Restart the feed for `category`; `"all"` removes the filter
    pub async fn select_category(&self, category: &str) {
        let mut query = self.feed.query().await;
        query.category = if category.is_empty() || category == ALL_CATEGORIES {
            None
        } else {
            Some(category.to_string())
        };
        info!("Recommendations for {}", query.category.as_deref().unwrap_or(ALL_CATEGORIES));
        self.feed.reset(query).await;
    }

    /// Restart the feed without `video_id` (the one being watched)
    pub async fn exclude(&self, video_id: Option<&str>) {
        let mut query = self.feed.query().await;
        query.current_video_id = video_id.map(str::to_string);
        self.feed.reset(query).await;
    }

    pub async fn selected_category(&self) -> Option<String> {
        self.feed.query().await.category
    }

    /// Report viewer activity. Tracking is best effort: failures are logged
    /// and returned but never change any state.
    pub async fn track(&self, video_id: &str, action: ViewAction) -> Result<(), ClientError> {
        debug!("Tracking {:?} on {}", action, video_id);
        self.backend.track(video_id, action).await.map_err(|err| {
            warn!("Tracking {} failed: {}", video_id, err);
            err
        })
    }

    pub async fn detach(&self) {
        self.feed.detach().await;
    }

    pub async fn snapshot(&self) -> FeedSnapshot<Video> {
        self.feed.snapshot().await
    }
}
