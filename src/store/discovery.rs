//! Search, the category list and channel profiles.

use super::session::CurrentUser;
use crate::client::DiscoveryBackend;
use crate::shared::error::ClientError;
use crate::shared::models::{Category, Channel, SearchResults};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryState {
    pub query: Option<String>,
    pub results: SearchResults,
    /// Always starts with the synthetic "All" entry once loaded
    pub categories: Vec<Category>,
    pub channel: Option<Channel>,
    pub loading: bool,
    pub error: Option<ClientError>,
}

pub struct DiscoverySlice<B> {
    backend: Arc<B>,
    actor: CurrentUser,
    state: RwLock<DiscoveryState>,
}

impl<B: DiscoveryBackend> DiscoverySlice<B> {
    pub fn new(backend: Arc<B>, actor: CurrentUser) -> Self {
        Self {
            backend,
            actor,
            state: RwLock::new(DiscoveryState::default()),
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchResults, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::validation("q", "Enter something to search for"));
        }
        self.begin().await;
        self.state.write().await.query = Some(query.to_string());

        let result = self.backend.search(query).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(results) => {
                state.results = results.clone();
                Ok(results)
            }
            Err(err) => {
                error!("Search for {:?} failed: {}", query, err);
                state.results = SearchResults::default();
                state.error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        let fetched = match self.backend.categories().await {
            Ok(fetched) => fetched,
            Err(err) => return Err(self.record(err).await),
        };
        let mut categories = Vec::with_capacity(fetched.len() + 1);
        categories.push(Category::all());
        categories.extend(fetched.into_iter().filter(|c| !c.is_all()));

        self.state.write().await.categories = categories.clone();
        Ok(categories)
    }

    pub async fn channel(&self, username: &str) -> Result<Channel, ClientError> {
        self.begin().await;
        let result = self.backend.channel(username).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(channel) => {
                state.channel = Some(channel.clone());
                Ok(channel)
            }
            Err(err) => {
                error!("Failed to load channel {}: {}", username, err);
                state.channel = None;
                state.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Subscribe or unsubscribe. Not optimistic: the loaded channel changes
    /// only after the server agrees. Returns the new subscription state when
    /// the channel is loaded.
    pub async fn toggle_subscription(&self, channel_id: &str) -> Result<Option<bool>, ClientError> {
        self.actor.require().await?;
        if let Err(err) = self.backend.toggle_subscription(channel_id).await {
            return Err(self.record(err).await);
        }

        let mut state = self.state.write().await;
        let Some(channel) = state.channel.as_mut().filter(|c| c.id == channel_id) else {
            return Ok(None);
        };
        channel.is_subscribed = !channel.is_subscribed;
        channel.subscribers_count = if channel.is_subscribed {
            channel.subscribers_count + 1
        } else {
            channel.subscribers_count.saturating_sub(1)
        };
        info!(
            "{} {}",
            if channel.is_subscribed { "Subscribed to" } else { "Unsubscribed from" },
            channel.username
        );
        Ok(Some(channel.is_subscribed))
    }

    pub async fn snapshot(&self) -> DiscoveryState {
        self.state.read().await.clone()
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn record(&self, err: ClientError) -> ClientError {
        error!("Discovery request failed: {}", err);
        self.state.write().await.error = Some(err.clone());
        err
    }
}
