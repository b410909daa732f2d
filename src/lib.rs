//! VidTube - Client Core Library
//!
//! Headless client core for the VidTube video-sharing platform: a typed REST
//! client for the platform backend and the client-side state store a view
//! layer renders from.
//!
//! # Overview
//!
//! - Infinite-scroll feeds that merge pages, dedupe by id and know when the
//!   list has ended
//! - Optimistic like/dislike on videos and comments with rollback on failure
//! - Comment thread editing, notifications, search, channels and
//!   recommendation tracking
//!
//! # Module Structure
//!
//! - **`shared`** - Wire models, the API envelope, errors and configuration
//!   - Serde schemas with defaults applied once at ingestion
//!   - `ClientError`, `ConfigError`
//!
//! - **`client`** - `ApiClient` (reqwest) and the endpoint traits
//!   - One HTTP client for every slice
//!   - Bearer token, request deadline, error mapping
//!
//! - **`store`** - State slices
//!   - Session, videos, comments, recommendations, notifications, discovery
//!   - Pagination and optimistic-update machinery
//!
//! # Feature Flags
//!
//! - **`cli`** - Builds the `vidtube` command-line driver and pulls in `clap`,
//!   `futures-util` and `tracing-subscriber`
//!
//! # Usage
//!
//! ```rust,no_run
//! use vidtube::client::Config;
//! use vidtube::store::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::connect(Config::load()?)?;
//!
//! store.videos.load_next_page().await?;
//! for video in store.videos.feed().await.items {
//!     println!("{} ({})", video.title, video.duration_label());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! Slices keep their state behind `tokio::sync::RwLock` and never hold a
//! lock across a network call, so a `Store` can be shared between tasks.
//!
//! # Error Handling
//!
//! - `Result<T, ClientError>` from every fallible operation
//! - Slices also keep the last error so views can render it

/// Shared types and data structures
pub mod shared;

/// HTTP client for the platform API
pub mod client;

/// Client-side state slices
pub mod store;
