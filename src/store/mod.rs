//! # Client State Store
//!
//! Server-derived state the view layer reads, split into slices. One
//! [`Store`] is created at start-up and shared by reference; every slice
//! holds the same backend and the same [`CurrentUser`] handle.
//!
//! ```text
//! store/
//! ├── mod.rs              - Store: owns one of each slice
//! ├── optimistic.rs       - OptimisticLedger (snapshot / speculate / resolve)
//! ├── engagement.rs       - optimistic like/dislike over any slice
//! ├── pagination.rs       - PagedCollection, PagedFeed
//! ├── session.rs          - current user, login, token refresh
//! ├── videos.rs           - browse feed, current video, upload
//! ├── comments.rs         - comment thread editor
//! ├── recommendations.rs  - recommendation feed, activity tracking
//! ├── notifications.rs    - inbox
//! └── discovery.rs        - search, categories, channels
//! ```
//!
//! Slice state sits behind `tokio::sync::RwLock`; no lock is held across a
//! network call. Reads go through `snapshot()`-style methods that clone.

pub mod comments;
pub mod discovery;
pub mod engagement;
pub mod notifications;
pub mod optimistic;
pub mod pagination;
pub mod recommendations;
pub mod session;
pub mod videos;

pub use comments::{CommentThread, ThreadSnapshot};
pub use discovery::{DiscoverySlice, DiscoveryState};
pub use notifications::{NotificationSlice, NotificationState};
pub use optimistic::OptimisticLedger;
pub use pagination::{FeedSnapshot, Identified, LoadOutcome, Page, PagedCollection, PagedFeed};
pub use recommendations::RecommendationSlice;
pub use session::{AuthState, CurrentUser, Session};
pub use videos::{CurrentVideo, VideoSlice, VideoStatus};

use crate::client::{ApiClient, Backend, Config};
use crate::shared::error::ClientError;
use std::sync::Arc;
use tracing::info;

pub struct Store<B> {
    backend: Arc<B>,
    pub session: Session<B>,
    pub videos: VideoSlice<B>,
    pub comments: CommentThread<B>,
    pub recommendations: RecommendationSlice<B>,
    pub notifications: NotificationSlice<B>,
    pub discovery: DiscoverySlice<B>,
}

impl<B: Backend> Store<B> {
    pub fn new(backend: Arc<B>, page_size: u32) -> Self {
        let actor = CurrentUser::anonymous();
        Self {
            session: Session::new(backend.clone(), actor.clone()),
            videos: VideoSlice::new(backend.clone(), actor.clone(), page_size),
            comments: CommentThread::new(backend.clone(), actor.clone()),
            recommendations: RecommendationSlice::new(backend.clone(), page_size),
            notifications: NotificationSlice::new(backend.clone()),
            discovery: DiscoverySlice::new(backend.clone(), actor),
            backend,
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn current_user(&self) -> &CurrentUser {
        self.session.current_user()
    }
}

impl Store<ApiClient> {
    /// Build the HTTP client from `config` and a store around it
    pub fn connect(config: Config) -> Result<Self, ClientError> {
        let page_size = config.page_size();
        let client = ApiClient::new(config)?;
        info!("Store connected to {}", client.config().server_url());
        Ok(Self::new(Arc::new(client), page_size))
    }
}
