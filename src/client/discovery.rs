//! Recommendation feed, activity tracking, search, categories and channels.

use super::backend::{DiscoveryBackend, RecommendationBackend, RecommendationQuery, ViewAction};
use super::{segment, ApiClient};
use crate::shared::error::ClientError;
use crate::shared::models::{Category, Channel, SearchResults, VideoPage};
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationParams<'a> {
    limit: u32,
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_video_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackBody<'a> {
    video_id: &'a str,
    action: ViewAction,
}

impl RecommendationBackend for ApiClient {
    async fn recommendations(
        &self,
        query: &RecommendationQuery,
        page: u32,
        limit: u32,
    ) -> Result<VideoPage, ClientError> {
        let params = RecommendationParams {
            limit,
            page,
            category: query.category.as_deref(),
            current_video_id: query.current_video_id.as_deref(),
        };
        self.fetch(self.request(Method::GET, "/recommendations").query(&params))
            .await
    }

    async fn track(&self, video_id: &str, action: ViewAction) -> Result<(), ClientError> {
        self.execute(
            self.request(Method::POST, "/recommendations/track")
                .json(&TrackBody { video_id, action }),
        )
        .await
    }
}

impl DiscoveryBackend for ApiClient {
    async fn search(&self, query: &str) -> Result<SearchResults, ClientError> {
        self.fetch(self.request(Method::GET, "/search").query(&[("q", query)]))
            .await
    }

    async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.fetch(self.request(Method::GET, "/category")).await
    }

    async fn channel(&self, username: &str) -> Result<Channel, ClientError> {
        let path = format!("/users/c/{}", segment(username));
        self.fetch(self.request(Method::GET, &path)).await
    }

    async fn toggle_subscription(&self, channel_id: &str) -> Result<(), ClientError> {
        let path = format!("/users/subscribe/{}", segment(channel_id));
        self.execute(self.request(Method::POST, &path)).await
    }
}
