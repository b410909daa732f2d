//! Video endpoints.

use super::backend::{VideoBackend, VideoQuery};
use super::{segment, transport_error, ApiClient};
use crate::shared::error::ClientError;
use crate::shared::models::video::mime_for;
use crate::shared::models::{EngagementAction, Video, VideoPage, VideoUpload};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Uploads carry media files and get a longer deadline than other requests
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListParams<'a> {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    sort_by: &'a str,
    sort_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

impl VideoBackend for ApiClient {
    async fn list_videos(
        &self,
        query: &VideoQuery,
        page: u32,
        limit: u32,
    ) -> Result<VideoPage, ClientError> {
        let params = ListParams {
            page,
            limit,
            query: query.search.as_deref().filter(|q| !q.is_empty()),
            sort_by: &query.sort_by,
            sort_type: query.sort_order.as_str(),
            user_id: query.user_id.as_deref(),
        };
        self.fetch(self.request(Method::GET, "/videos").query(&params))
            .await
    }

    async fn get_video(&self, video_id: &str) -> Result<Video, ClientError> {
        let path = format!("/videos/{}", segment(video_id));
        self.fetch(self.request(Method::GET, &path)).await
    }

    async fn publish_video(&self, upload: &VideoUpload) -> Result<Video, ClientError> {
        upload.validate()?;
        let form = Form::new()
            .text("title", upload.title.trim().to_string())
            .text("description", upload.description.trim().to_string())
            .part("videoFile", media_part(&upload.video_file, "videoFile").await?)
            .part("thumbnail", media_part(&upload.thumbnail, "thumbnail").await?);

        let video: Video = self
            .fetch(
                self.request(Method::POST, "/videos")
                    .timeout(UPLOAD_TIMEOUT)
                    .multipart(form),
            )
            .await?;
        info!("Published video {}", video.id);
        Ok(video)
    }

    async fn react_to_video(
        &self,
        video_id: &str,
        action: EngagementAction,
    ) -> Result<Video, ClientError> {
        let path = format!("/videos/{}/{}", segment(video_id), action.as_path());
        self.fetch(self.request(Method::POST, &path)).await
    }
}

async fn media_part(path: &Path, field: &str) -> Result<Part, ClientError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ClientError::validation(field, format!("Cannot read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| field.to_string());
    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(path))
        .map_err(transport_error)
}
