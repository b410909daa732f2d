//! Session endpoints.

use super::backend::AuthBackend;
use super::ApiClient;
use crate::shared::error::ClientError;
use crate::shared::models::{AuthSession, Credentials, Registration, User};
use reqwest::Method;
use tracing::info;

impl ApiClient {
    fn remember_session(&self, session: &AuthSession) {
        if let Some(token) = &session.access_token {
            self.set_token(Some(token.clone()));
        }
    }
}

impl AuthBackend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        let session: AuthSession = self
            .fetch(self.request(Method::POST, "/users/login").json(credentials))
            .await?;
        self.remember_session(&session);
        info!("Signed in");
        Ok(session)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSession, ClientError> {
        let session: AuthSession = self
            .fetch(self.request(Method::POST, "/users/register").json(registration))
            .await?;
        self.remember_session(&session);
        Ok(session)
    }

    async fn current_user(&self) -> Result<User, ClientError> {
        self.fetch(self.request(Method::GET, "/users/current-user"))
            .await
    }

    async fn refresh_token(&self) -> Result<AuthSession, ClientError> {
        let session: AuthSession = self
            .fetch(self.request(Method::PATCH, "/users/refresh-token"))
            .await?;
        self.remember_session(&session);
        Ok(session)
    }

    fn forget_credentials(&self) {
        self.set_token(None);
    }
}
