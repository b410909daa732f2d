//! Video data structure
//!
//! Videos arrive from list, detail and like/dislike endpoints with slightly
//! different field sets (`likeCount` vs `likesCount`, owner populated or
//! not). [`RawVideo`] absorbs those differences and [`Video`] is the
//! normalised form the store keeps.

use super::{default_true, nullable, ChannelSummary, Engagement, OwnerRef, Reference};
use crate::shared::error::ClientError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "mkv", "avi", "m4v"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// A published video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawVideo", into = "RawVideo")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Playable media URL
    pub video_file: String,
    /// Thumbnail image URL
    pub thumbnail: String,
    /// Length in seconds
    pub duration: f64,
    pub views: u64,
    pub is_published: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub owner: Option<ChannelSummary>,
    pub category: Option<String>,
    pub engagement: Engagement,
}

impl Video {
    /// `m:ss` rendering of the duration
    pub fn duration_label(&self) -> String {
        let total = self.duration.max(0.0).round() as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVideo {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default, deserialize_with = "nullable")]
    title: String,
    #[serde(default, deserialize_with = "nullable")]
    description: String,
    #[serde(default, deserialize_with = "nullable")]
    video_file: String,
    #[serde(default, deserialize_with = "nullable")]
    thumbnail: String,
    #[serde(default, deserialize_with = "nullable")]
    duration: f64,
    #[serde(default, deserialize_with = "nullable")]
    views: u64,
    #[serde(default = "default_true")]
    is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<OwnerRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<Reference>,
    #[serde(default, alias = "likesCount", deserialize_with = "nullable")]
    like_count: i64,
    #[serde(default, alias = "dislikesCount", deserialize_with = "nullable")]
    dislike_count: i64,
    #[serde(default, deserialize_with = "nullable")]
    is_liked: bool,
    #[serde(default, deserialize_with = "nullable")]
    is_disliked: bool,
}

impl From<RawVideo> for Video {
    fn from(raw: RawVideo) -> Self {
        Self {
            engagement: Engagement::from_flags(
                raw.is_liked,
                raw.is_disliked,
                raw.like_count,
                raw.dislike_count,
            ),
            id: raw.id,
            title: raw.title,
            description: raw.description,
            video_file: raw.video_file,
            thumbnail: raw.thumbnail,
            duration: raw.duration,
            views: raw.views,
            is_published: raw.is_published,
            created_at: raw.created_at,
            owner: raw.owner.map(ChannelSummary::from),
            category: raw.category.map(Reference::into_id),
        }
    }
}

impl From<Video> for RawVideo {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            title: video.title,
            description: video.description,
            video_file: video.video_file,
            thumbnail: video.thumbnail,
            duration: video.duration,
            views: video.views,
            is_published: video.is_published,
            created_at: video.created_at,
            owner: video.owner.map(OwnerRef::Summary),
            category: video.category.map(Reference::Id),
            like_count: video.engagement.likes as i64,
            dislike_count: video.engagement.dislikes as i64,
            is_liked: video.engagement.is_liked(),
            is_disliked: video.engagement.is_disliked(),
        }
    }
}

/// A video to publish, with local media files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUpload {
    pub title: String,
    pub description: String,
    pub video_file: PathBuf,
    pub thumbnail: PathBuf,
}

impl VideoUpload {
    /// Check every field before anything is read or sent
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.title.trim().is_empty() {
            return Err(ClientError::validation("title", "Title is required"));
        }
        if self.description.trim().is_empty() {
            return Err(ClientError::validation("description", "Description is required"));
        }
        check_media(&self.video_file, "videoFile", VIDEO_EXTENSIONS, "video")?;
        check_media(&self.thumbnail, "thumbnail", IMAGE_EXTENSIONS, "image")?;
        Ok(())
    }
}

fn check_media(path: &Path, field: &str, allowed: &[&str], kind: &str) -> Result<(), ClientError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !allowed.contains(&extension.as_str()) {
        return Err(ClientError::validation(
            field,
            format!("Please upload a valid {kind} file"),
        ));
    }
    if !path.is_file() {
        return Err(ClientError::validation(
            field,
            format!("{} does not exist", path.display()),
        ));
    }
    Ok(())
}

/// MIME type for an upload part, from the file extension
pub(crate) fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
