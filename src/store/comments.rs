//! Comment thread for one video.
//!
//! Create and edit are confirmed by the server before the list changes;
//! delete removes the comment only after the server agrees. Like/dislike is
//! optimistic. Results that land after `detach` or after the thread moved
//! to another video are dropped.
//!
//! Lock order is `comments` then `status`.

use super::engagement::{toggle_optimistically, EngagementLedger, EngagementTarget};
use super::session::CurrentUser;
use crate::client::CommentBackend;
use crate::shared::error::ClientError;
use crate::shared::models::{Comment, CommentEngagement, Engagement, EngagementAction};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Read-only copy of the thread for rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadSnapshot {
    pub video_id: Option<String>,
    pub comments: Vec<Comment>,
    pub editing: Option<String>,
    pub loading: bool,
    pub error: Option<ClientError>,
}

#[derive(Debug, Default)]
struct CommentList {
    items: Vec<Comment>,
    /// Bumped on load/detach so a late response is ignored
    generation: u64,
    detached: bool,
}

impl CommentList {
    fn accepts(&self, generation: u64) -> bool {
        !self.detached && self.generation == generation
    }
}

impl EngagementTarget for CommentList {
    fn engagement_of(&mut self, id: &str) -> Option<&mut Engagement> {
        self.items.engagement_of(id)
    }

    fn epoch(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct ThreadStatus {
    video_id: Option<String>,
    editing: Option<String>,
    loading: bool,
    error: Option<ClientError>,
}

pub struct CommentThread<B> {
    backend: Arc<B>,
    actor: CurrentUser,
    comments: RwLock<CommentList>,
    status: RwLock<ThreadStatus>,
    ledger: EngagementLedger,
}

fn blank(content: &str) -> Result<&str, ClientError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation("comment", "Comment cannot be empty"));
    }
    Ok(trimmed)
}

impl<B: CommentBackend> CommentThread<B> {
    pub fn new(backend: Arc<B>, actor: CurrentUser) -> Self {
        Self {
            backend,
            actor,
            comments: RwLock::new(CommentList::default()),
            status: RwLock::new(ThreadStatus::default()),
            ledger: EngagementLedger::default(),
        }
    }

    /// Fetch the whole thread for `video_id`; on failure the list is emptied
    pub async fn load(&self, video_id: &str) -> Result<usize, ClientError> {
        let generation = {
            let mut list = self.comments.write().await;
            list.generation += 1;
            list.detached = false;
            let mut status = self.status.write().await;
            status.video_id = Some(video_id.to_string());
            status.editing = None;
            status.loading = true;
            status.error = None;
            list.generation
        };

        let result = self.backend.list_comments(video_id).await;

        let mut list = self.comments.write().await;
        if !list.accepts(generation) {
            debug!("Dropping stale comment list for {}", video_id);
            return result.map(|comments| comments.len());
        }
        let mut status = self.status.write().await;
        status.loading = false;
        match result {
            Ok(fetched) => {
                list.items = fetched;
                Ok(list.items.len())
            }
            Err(err) => {
                error!("Failed to load comments for {}: {}", video_id, err);
                list.items.clear();
                status.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Post a new comment; it goes to the top of the thread
    pub async fn add(&self, content: &str) -> Result<Comment, ClientError> {
        let content = blank(content)?;
        self.actor.require().await?;
        let generation = self.generation().await;
        let video_id = self
            .status
            .read()
            .await
            .video_id
            .clone()
            .ok_or_else(|| ClientError::validation("video", "No video selected"))?;

        let result = self.backend.add_comment(&video_id, content).await;

        let mut list = self.comments.write().await;
        if !list.accepts(generation) {
            debug!("Dropping new comment for {}: thread changed", video_id);
            return result;
        }
        match result {
            Ok(comment) => {
                info!("Added comment {}", comment.id);
                list.items.insert(0, comment.clone());
                Ok(comment)
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    /// Put `comment_id` in edit mode, replacing any other edit target
    pub async fn begin_edit(&self, comment_id: &str) -> Result<(), ClientError> {
        let actor = self.actor.require().await?;
        let owned = self
            .comments
            .read()
            .await
            .items
            .iter()
            .any(|c| c.id == comment_id && c.is_owned_by(&actor.id));
        if !owned {
            return Err(ClientError::validation("comment", "You can only edit your own comments"));
        }
        self.status.write().await.editing = Some(comment_id.to_string());
        Ok(())
    }

    pub async fn cancel_edit(&self) {
        self.status.write().await.editing = None;
    }

    pub async fn editing(&self) -> Option<String> {
        self.status.read().await.editing.clone()
    }

    /// Save the comment in edit mode; content is untouched on failure
    pub async fn submit_edit(&self, content: &str) -> Result<Comment, ClientError> {
        let content = blank(content)?;
        self.actor.require().await?;
        let generation = self.generation().await;
        let comment_id = self
            .editing()
            .await
            .ok_or_else(|| ClientError::validation("comment", "No comment is being edited"))?;

        let result = self.backend.update_comment(&comment_id, content).await;

        let mut list = self.comments.write().await;
        if !list.accepts(generation) {
            debug!("Dropping edit of {}: thread changed", comment_id);
            return result;
        }
        match result {
            Ok(updated) => {
                if let Some(slot) = list.items.iter_mut().find(|c| c.id == comment_id) {
                    // the update response may omit the owner
                    let owner = slot.owner.take();
                    *slot = Comment {
                        owner: updated.owner.clone().or(owner),
                        ..updated.clone()
                    };
                }
                let mut status = self.status.write().await;
                if status.editing.as_deref() == Some(comment_id.as_str()) {
                    status.editing = None;
                }
                Ok(updated)
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    pub async fn delete(&self, comment_id: &str) -> Result<(), ClientError> {
        self.actor.require().await?;
        let generation = self.generation().await;

        let result = self.backend.delete_comment(comment_id).await;

        let mut list = self.comments.write().await;
        if !list.accepts(generation) {
            debug!("Dropping delete of {}: thread changed", comment_id);
            return result;
        }
        match result {
            Ok(()) => {
                list.items.retain(|c| c.id != comment_id);
                let mut status = self.status.write().await;
                if status.editing.as_deref() == Some(comment_id) {
                    status.editing = None;
                }
                Ok(())
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    pub async fn toggle(
        &self,
        comment_id: &str,
        action: EngagementAction,
    ) -> Result<Engagement, ClientError> {
        self.actor.require().await?;
        let generation = self.generation().await;
        let result = toggle_optimistically(
            &self.comments,
            &self.ledger,
            comment_id,
            action,
            self.backend.react_to_comment(comment_id, action),
            |response: CommentEngagement| response.engagement(),
        )
        .await;
        if let Err(err) = &result {
            if self.comments.read().await.accepts(generation) {
                self.status.write().await.error = Some(err.clone());
            }
        }
        result
    }

    pub async fn toggle_like(&self, comment_id: &str) -> Result<Engagement, ClientError> {
        self.toggle(comment_id, EngagementAction::Like).await
    }

    pub async fn toggle_dislike(&self, comment_id: &str) -> Result<Engagement, ClientError> {
        self.toggle(comment_id, EngagementAction::Dislike).await
    }

    /// Only the author may edit or delete
    pub async fn can_modify(&self, comment: &Comment) -> bool {
        match self.actor.get().await {
            Some(user) => comment.is_owned_by(&user.id),
            None => false,
        }
    }

    /// The view went away; responses still in flight are ignored
    pub async fn detach(&self) {
        let mut list = self.comments.write().await;
        list.detached = true;
        list.generation += 1;
        self.status.write().await.loading = false;
    }

    pub async fn snapshot(&self) -> ThreadSnapshot {
        let list = self.comments.read().await;
        let status = self.status.read().await;
        ThreadSnapshot {
            video_id: status.video_id.clone(),
            comments: list.items.clone(),
            editing: status.editing.clone(),
            loading: status.loading,
            error: status.error.clone(),
        }
    }

    async fn generation(&self) -> u64 {
        self.comments.read().await.generation
    }

    async fn record(&self, err: ClientError) -> ClientError {
        error!("Comment request failed: {}", err);
        self.status.write().await.error = Some(err.clone());
        err
    }
}
