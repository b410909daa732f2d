//! Session slice: who is signed in.
//!
//! [`CurrentUser`] is a cheap, cloneable handle every other slice holds so
//! mutations can ask for an actor without depending on the whole session.

use crate::client::AuthBackend;
use crate::shared::error::ClientError;
use crate::shared::models::{AuthSession, Credentials, Registration, User};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Shared handle to the signed-in user
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(Arc<RwLock<Option<User>>>);

impl CurrentUser {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self(Arc::new(RwLock::new(Some(user))))
    }

    pub async fn get(&self) -> Option<User> {
        self.0.read().await.clone()
    }

    /// The actor for a mutation, or `Unauthenticated`
    pub async fn require(&self) -> Result<User, ClientError> {
        self.get().await.ok_or(ClientError::Unauthenticated)
    }

    pub async fn is_signed_in(&self) -> bool {
        self.0.read().await.is_some()
    }

    pub(crate) async fn set(&self, user: Option<User>) {
        *self.0.write().await = user;
    }
}

/// Authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<ClientError>,
}

impl AuthState {
    pub fn authenticated(&self) -> bool {
        self.user.is_some()
    }
}

pub struct Session<B> {
    backend: Arc<B>,
    current: CurrentUser,
    status: RwLock<SessionStatus>,
}

#[derive(Debug, Default)]
struct SessionStatus {
    loading: bool,
    error: Option<ClientError>,
}

impl<B: AuthBackend> Session<B> {
    pub fn new(backend: Arc<B>, current: CurrentUser) -> Self {
        Self {
            backend,
            current,
            status: RwLock::new(SessionStatus::default()),
        }
    }

    pub fn current_user(&self) -> &CurrentUser {
        &self.current
    }

    /// Shorthand for [`CurrentUser::require`]
    pub async fn require_actor(&self) -> Result<User, ClientError> {
        self.current.require().await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User, ClientError> {
        credentials.validate()?;
        self.begin().await;
        let result = match self.backend.login(credentials).await {
            Ok(session) => self.user_from(session).await,
            Err(err) => Err(err),
        };
        self.finish(result).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<User, ClientError> {
        registration.validate()?;
        self.begin().await;
        let result = match self.backend.register(registration).await {
            Ok(session) => self.user_from(session).await,
            Err(err) => Err(err),
        };
        self.finish(result).await
    }

    /// Ask the server who we are.
    ///
    /// A 401 triggers one token refresh and a retry. A second 401 signs the
    /// session out and yields `Ok(None)`; any other failure is returned and
    /// the current user is kept.
    pub async fn check_auth(&self) -> Result<Option<User>, ClientError> {
        self.begin().await;
        let result = match self.backend.current_user().await {
            Err(ClientError::Server { status: 401, .. }) => {
                info!("Access token rejected, refreshing");
                match self.backend.refresh_token().await {
                    Ok(_) => self.backend.current_user().await,
                    Err(err) => Err(err),
                }
            }
            other => other,
        };

        match result {
            Ok(user) => self.finish(Ok(user)).await.map(Some),
            Err(ClientError::Server { status: 401, .. }) => {
                self.backend.forget_credentials();
                self.current.set(None).await;
                *self.status.write().await = SessionStatus::default();
                Ok(None)
            }
            Err(err) => self.finish(Err(err)).await.map(Some),
        }
    }

    pub async fn logout(&self) {
        self.backend.forget_credentials();
        self.current.set(None).await;
        *self.status.write().await = SessionStatus::default();
        info!("Signed out");
    }

    pub async fn state(&self) -> AuthState {
        let status = self.status.read().await;
        AuthState {
            user: self.current.get().await,
            loading: status.loading,
            error: status.error.clone(),
        }
    }

    async fn user_from(&self, session: AuthSession) -> Result<User, ClientError> {
        match session.user {
            Some(user) => Ok(user),
            None => self.backend.current_user().await,
        }
    }

    async fn begin(&self) {
        let mut status = self.status.write().await;
        status.loading = true;
        status.error = None;
    }

    async fn finish(&self, result: Result<User, ClientError>) -> Result<User, ClientError> {
        match &result {
            Ok(user) => {
                info!("Signed in as {}", user.username);
                self.current.set(Some(user.clone())).await;
            }
            Err(err) => warn!("Authentication failed: {}", err),
        }
        let mut status = self.status.write().await;
        status.loading = false;
        status.error = result.as_ref().err().cloned();
        result
    }
}
