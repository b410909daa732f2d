use crate::client::NotificationBackend;
use crate::shared::error::ClientError;
use crate::shared::models::Notification;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationState {
    pub items: Vec<Notification>,
    pub loading: bool,
    pub error: Option<ClientError>,
}

impl NotificationState {
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }
}

pub struct NotificationSlice<B> {
    backend: Arc<B>,
    state: RwLock<NotificationState>,
}

impl<B: NotificationBackend> NotificationSlice<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: RwLock::new(NotificationState::default()),
        }
    }

    /// Reload the inbox; a failed load leaves it empty
    pub async fn refresh(&self) -> Result<usize, ClientError> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        let result = self.backend.notifications().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(items) => {
                state.items = items;
                Ok(state.unread_count())
            }
            Err(err) => {
                error!("Failed to load notifications: {}", err);
                state.items.clear();
                state.error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<(), ClientError> {
        match self.backend.mark_notification_read(notification_id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                if let Some(item) = state.items.iter_mut().find(|n| n.id == notification_id) {
                    item.is_read = true;
                }
                Ok(())
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    pub async fn mark_all_read(&self) -> Result<(), ClientError> {
        match self.backend.mark_all_notifications_read().await {
            Ok(()) => {
                for item in self.state.write().await.items.iter_mut() {
                    item.is_read = true;
                }
                Ok(())
            }
            Err(err) => Err(self.record(err).await),
        }
    }

    pub async fn unread_count(&self) -> usize {
        self.state.read().await.unread_count()
    }

    pub async fn snapshot(&self) -> NotificationState {
        self.state.read().await.clone()
    }

    async fn record(&self, err: ClientError) -> ClientError {
        error!("Notification request failed: {}", err);
        self.state.write().await.error = Some(err.clone());
        err
    }
}
