//! Comment endpoints.

use super::backend::CommentBackend;
use super::{segment, ApiClient};
use crate::shared::error::ClientError;
use crate::shared::models::{Comment, CommentEngagement, EngagementAction};
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
struct CommentBody<'a> {
    comment: &'a str,
}

impl CommentBackend for ApiClient {
    async fn list_comments(&self, video_id: &str) -> Result<Vec<Comment>, ClientError> {
        let path = format!("/comments/{}", segment(video_id));
        self.fetch(self.request(Method::GET, &path)).await
    }

    async fn add_comment(&self, video_id: &str, content: &str) -> Result<Comment, ClientError> {
        let path = format!("/comments/{}", segment(video_id));
        self.fetch(
            self.request(Method::POST, &path)
                .json(&CommentBody { comment: content }),
        )
        .await
    }

    async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment, ClientError> {
        let path = format!("/comments/c/{}", segment(comment_id));
        self.fetch(
            self.request(Method::PATCH, &path)
                .json(&CommentBody { comment: content }),
        )
        .await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<(), ClientError> {
        let path = format!("/comments/c/{}", segment(comment_id));
        self.execute(self.request(Method::DELETE, &path)).await
    }

    async fn react_to_comment(
        &self,
        comment_id: &str,
        action: EngagementAction,
    ) -> Result<CommentEngagement, ClientError> {
        let path = format!("/comments/{}/{}", segment(comment_id), action.as_path());
        self.fetch(self.request(Method::POST, &path)).await
    }
}
