use super::backend::NotificationBackend;
use super::{segment, ApiClient};
use crate::shared::error::ClientError;
use crate::shared::models::Notification;
use reqwest::Method;

impl NotificationBackend for ApiClient {
    async fn notifications(&self) -> Result<Vec<Notification>, ClientError> {
        self.fetch(self.request(Method::GET, "/notifications")).await
    }

    async fn mark_notification_read(&self, notification_id: &str) -> Result<(), ClientError> {
        let path = format!("/notifications/{}/read", segment(notification_id));
        self.execute(self.request(Method::PATCH, &path)).await
    }

    async fn mark_all_notifications_read(&self) -> Result<(), ClientError> {
        self.execute(self.request(Method::PATCH, "/notifications/mark-all-read"))
            .await
    }
}
