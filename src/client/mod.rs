//! HTTP API Client
//!
//! [`ApiClient`] is the single HTTP client every state slice goes through.
//! It owns one `reqwest::Client` (connection pool, cookie jar, request
//! deadline) and the bearer token, and turns every response into either the
//! envelope's `data` or a [`ClientError`].
//!
//! # Error mapping
//!
//! - 2xx: body decoded as `{ data: T }`; a schema mismatch is `Decode`
//! - 4xx/5xx: `{ message }` from the body, verbatim, as `Server`
//! - no response (connect failure, deadline): `Network` with a fixed message
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs             - ApiClient core: request building, error mapping
//! ├── config.rs          - Config (endpoint URLs, token, deadline)
//! ├── backend.rs         - endpoint traits the store depends on
//! ├── users.rs           - login, registration, token refresh
//! ├── videos.rs          - listing, detail, upload, like/dislike
//! ├── comments.rs        - comment CRUD and like/dislike
//! ├── notifications.rs   - notification feed
//! └── discovery.rs       - recommendations, tracking, search, categories, channels
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use vidtube::client::{ApiClient, Config, VideoBackend, VideoQuery};
//!
//! # async fn example() -> Result<(), vidtube::shared::ClientError> {
//! let client = ApiClient::new(Config::new())?;
//! let page = client.list_videos(&VideoQuery::default(), 1, 10).await?;
//! println!("{} of {} videos", page.videos.len(), page.total_videos);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
mod comments;
mod discovery;
mod notifications;
mod users;
mod videos;

pub use backend::{
    AuthBackend, Backend, CommentBackend, DiscoveryBackend, NotificationBackend,
    RecommendationBackend, SortOrder, VideoBackend, VideoQuery, RecommendationQuery, ViewAction,
};
pub use config::Config;

use crate::shared::error::ClientError;
use crate::shared::models::{ApiResponse, ErrorBody};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, warn};

/// REST client for the video platform backend
#[derive(Debug)]
pub struct ApiClient {
    config: RwLock<Config>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .cookie_store(true)
            .build()
            .map_err(|e| {
                warn!("Failed to build HTTP client: {}", e);
                ClientError::network()
            })?;
        Ok(Self {
            config: RwLock::new(config),
            http,
        })
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> Config {
        self.read_config().clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        self.config
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_token(token);
    }

    pub fn token(&self) -> Option<String> {
        self.read_config().get_token().cloned()
    }

    fn read_config(&self) -> RwLockReadGuard<'_, Config> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a request to `path` (relative to the API prefix), authenticated
    /// when a token is held.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let config = self.read_config();
        let url = config.api_url(path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match config.get_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and decode the envelope's `data`
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = send(builder).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&body).map_err(|e| {
            warn!("Response did not match schema: {}", e);
            ClientError::from(e)
        })?;
        Ok(envelope.data)
    }

    /// Send and ignore whatever body comes back
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<(), ClientError> {
        send(builder).await.map(|_| ())
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, ClientError> {
    let response = builder.send().await.map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.map_err(transport_error)?;
    Err(error_from_body(status, &body))
}

fn error_from_body(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        });
    warn!("Server rejected request: {} {}", status.as_u16(), message);
    ClientError::server(status.as_u16(), message)
}

fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_decode() {
        return ClientError::decode(err.to_string());
    }
    warn!("Request failed without a response: {}", err);
    ClientError::network()
}

/// RFC 3986 unreserved characters pass through, everything else is escaped
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one path segment
pub(crate) fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}
