//! # Paged Collections
//!
//! Infinite-scroll state: items accumulated page by page, a one-based page
//! cursor, `has_more` from the server's page count, and a loading/error
//! status.
//!
//! [`PagedCollection`] is the synchronous state machine. It never performs
//! I/O; a fetch is split into [`PagedCollection::begin_next`] (claims the
//! single in-flight slot and hands out a [`PageRequest`]) and
//! [`PagedCollection::complete`] / [`PagedCollection::fail`] (resolve it).
//! [`PagedFeed`] drives that machine against a [`PageSource`] without
//! holding the lock across the network await.
//!
//! ## Invariants
//!
//! - Item ids are unique; a refetched item replaces the old copy in place
//! - At most one request is outstanding; `begin_next` returns `None` otherwise
//! - The cursor only advances when a page arrives
//! - Every request carries the generation it was issued in; `reset` and
//!   `detach` bump the generation so late results are ignored

use crate::client::{RecommendationBackend, RecommendationQuery, VideoBackend, VideoQuery};
use crate::shared::error::ClientError;
use crate::shared::models::{Comment, Video};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// How close (in items) to the end of the list the viewer must scroll
/// before [`PagedFeed::on_near_end`] asks for the next page
pub const NEAR_END_THRESHOLD: usize = 3;

/// Anything with a server-assigned identity
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Video {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Comment {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One page as returned by the server
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

/// A claimed fetch: which page to ask for and with which filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<Q> {
    /// One-based
    pub page: u32,
    pub limit: u32,
    pub query: Q,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct PagedCollection<T, Q> {
    items: Vec<T>,
    index: HashMap<String, usize>,
    cursor: u32,
    has_more: bool,
    loading: bool,
    error: Option<ClientError>,
    page_size: u32,
    query: Q,
    generation: u64,
    detached: bool,
}

impl<T, Q> PagedCollection<T, Q>
where
    T: Identified,
    Q: Clone,
{
    pub fn new(page_size: u32, query: Q) -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            cursor: 0,
            has_more: true,
            loading: false,
            error: None,
            page_size: page_size.max(1),
            query,
            generation: 0,
            detached: false,
        }
    }

    /// Claim the in-flight slot for the next page.
    ///
    /// `None` while a fetch is outstanding, after the last page, or once
    /// the collection is detached.
    pub fn begin_next(&mut self) -> Option<PageRequest<Q>> {
        if self.detached || self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(PageRequest {
            page: self.cursor + 1,
            limit: self.page_size,
            query: self.query.clone(),
            generation: self.generation,
        })
    }

    /// Merge a fetched page. Returns `false` if the request is stale and the
    /// page was dropped.
    pub fn complete(&mut self, request: &PageRequest<Q>, page: Page<T>) -> bool {
        if !self.is_current(request) {
            debug!("Dropping stale page {}", request.page);
            return false;
        }
        self.loading = false;
        self.merge(page.items);
        self.cursor = request.page;
        self.has_more = request.page < page.total_pages;
        true
    }

    /// Record a failed fetch; items and cursor stay as they were
    pub fn fail(&mut self, request: &PageRequest<Q>, error: ClientError) -> bool {
        if !self.is_current(request) {
            return false;
        }
        self.loading = false;
        self.error = Some(error);
        true
    }

    /// Start over with new filters
    pub fn reset(&mut self, query: Q) {
        self.generation += 1;
        self.items.clear();
        self.index.clear();
        self.cursor = 0;
        self.has_more = true;
        self.loading = false;
        self.error = None;
        self.query = query;
        self.detached = false;
    }

    /// Stop accepting results; in-flight requests are left to finish
    pub fn detach(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.detached = true;
    }

    /// Changes whenever accumulated state is thrown away
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    fn is_current(&self, request: &PageRequest<Q>) -> bool {
        !self.detached && request.generation == self.generation
    }

    fn merge(&mut self, incoming: Vec<T>) {
        for item in incoming {
            match self.index.get(item.id()) {
                Some(&position) => self.items[position] = item,
                None => {
                    self.index.insert(item.id().to_string(), self.items.len());
                    self.items.push(item);
                }
            }
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.id().to_string(), position))
            .collect();
    }

    /// Insert at the top (a freshly created item); an existing copy moves up
    pub fn prepend(&mut self, item: T) {
        if let Some(position) = self.index.get(item.id()).copied() {
            self.items.remove(position);
        }
        self.items.insert(0, item);
        self.reindex();
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let position = self.index.get(id).copied()?;
        let removed = self.items.remove(position);
        self.reindex();
        Some(removed)
    }

    /// Swap in a new copy; returns `false` if the id is not loaded
    pub fn replace_item(&mut self, item: T) -> bool {
        match self.index.get(item.id()) {
            Some(&position) => {
                self.items[position] = item;
                true
            }
            None => false,
        }
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut T> {
        let position = *self.index.get(id)?;
        self.items.get_mut(position)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last page successfully merged (0 before the first)
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    pub fn query(&self) -> &Q {
        &self.query
    }
}

/// Where pages come from
pub trait PageSource<T, Q>: Send + Sync {
    fn fetch_page(
        &self,
        request: &PageRequest<Q>,
    ) -> impl Future<Output = Result<Page<T>, ClientError>> + Send;
}

/// `GET /videos`
pub struct VideoPages<B>(pub Arc<B>);

impl<B: VideoBackend> PageSource<Video, VideoQuery> for VideoPages<B> {
    async fn fetch_page(&self, request: &PageRequest<VideoQuery>) -> Result<Page<Video>, ClientError> {
        let page = self
            .0
            .list_videos(&request.query, request.page, request.limit)
            .await?;
        Ok(Page {
            items: page.videos,
            total_pages: page.total_pages,
        })
    }
}

/// `GET /recommendations`
pub struct RecommendationPages<B>(pub Arc<B>);

impl<B: RecommendationBackend> PageSource<Video, RecommendationQuery> for RecommendationPages<B> {
    async fn fetch_page(
        &self,
        request: &PageRequest<RecommendationQuery>,
    ) -> Result<Page<Video>, ClientError> {
        let page = self
            .0
            .recommendations(&request.query, request.page, request.limit)
            .await?;
        Ok(Page {
            items: page.videos,
            total_pages: page.total_pages,
        })
    }
}

/// What a call to [`PagedFeed::load_next_page`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing requested: in flight, exhausted, or detached
    Skipped,
    /// Page merged
    Loaded { page: u32 },
    /// Response arrived after a reset or detach and was thrown away
    Discarded,
}

/// Read-only copy of a collection for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot<T> {
    pub items: Vec<T>,
    pub cursor: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<ClientError>,
}

/// A [`PagedCollection`] wired to its [`PageSource`]
pub struct PagedFeed<T, Q, S> {
    state: Arc<RwLock<PagedCollection<T, Q>>>,
    source: S,
}

impl<T, Q, S> PagedFeed<T, Q, S>
where
    T: Identified + Clone + Send + Sync,
    Q: Clone + Send + Sync,
    S: PageSource<T, Q>,
{
    pub fn new(source: S, page_size: u32, query: Q) -> Self {
        Self {
            state: Arc::new(RwLock::new(PagedCollection::new(page_size, query))),
            source,
        }
    }

    /// Fetch `cursor + 1` unless a fetch is already running or the list is
    /// exhausted.
    pub async fn load_next_page(&self) -> Result<LoadOutcome, ClientError> {
        let request = match self.state.write().await.begin_next() {
            Some(request) => request,
            None => return Ok(LoadOutcome::Skipped),
        };
        debug!("Fetching page {}", request.page);

        let result = self.source.fetch_page(&request).await;

        let mut state = self.state.write().await;
        match result {
            Ok(page) => {
                if state.complete(&request, page) {
                    Ok(LoadOutcome::Loaded { page: request.page })
                } else {
                    Ok(LoadOutcome::Discarded)
                }
            }
            Err(err) => {
                if state.fail(&request, err.clone()) {
                    error!("Failed to load page {}: {}", request.page, err);
                    Err(err)
                } else {
                    Ok(LoadOutcome::Discarded)
                }
            }
        }
    }

    /// Scroll trigger: `last_visible` is the index of the last rendered item
    pub async fn on_near_end(&self, last_visible: usize) -> Result<LoadOutcome, ClientError> {
        let len = self.state.read().await.len();
        if last_visible.saturating_add(NEAR_END_THRESHOLD) < len {
            return Ok(LoadOutcome::Skipped);
        }
        self.load_next_page().await
    }

    pub async fn reset(&self, query: Q) {
        self.state.write().await.reset(query);
    }

    pub async fn detach(&self) {
        self.state.write().await.detach();
    }

    pub async fn query(&self) -> Q {
        self.state.read().await.query().clone()
    }

    pub async fn snapshot(&self) -> FeedSnapshot<T> {
        let state = self.state.read().await;
        FeedSnapshot {
            items: state.items().to_vec(),
            cursor: state.cursor(),
            has_more: state.has_more(),
            loading: state.is_loading(),
            error: state.error().cloned(),
        }
    }

    pub(crate) fn state(&self) -> &RwLock<PagedCollection<T, Q>> {
        &self.state
    }
}
