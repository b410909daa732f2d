//! Client Error Types
//!
//! This module defines the error type every client operation returns and every
//! state slice stores. Errors are `Clone` so a slice can keep the last failure
//! around for rendering while the caller also receives it.
//!
//! # Error Categories
//!
//! - `Validation` - rejected locally before any network call (blank input, bad file)
//! - `Unauthenticated` - a mutation was attempted without a signed-in actor
//! - `Server` - the backend answered with a 4xx/5xx; `message` is its own text
//! - `Network` - no response at all (connect failure, timeout)
//! - `Decode` - a successful response whose body did not match the schema
//!
//! # Usage
//!
//! ```rust
//! use vidtube::shared::error::ClientError;
//!
//! let error = ClientError::validation("content", "Comment cannot be empty");
//! assert!(!error.is_network());
//! ```
use thiserror::Error;

/// Fixed user-facing text for requests that never got a response.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network connection error. Please check your internet connection.";

/// Errors surfaced by the API client and stored by the state slices
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Input rejected on the client, never sent to the server
    #[error("{message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// No authenticated actor for an operation that requires one
    #[error("Please sign in to continue")]
    Unauthenticated,

    /// The server rejected the request
    #[error("{message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The request never produced a response
    #[error("{message}")]
    Network {
        /// Human-readable error message
        message: String,
    },

    /// A 2xx body did not match the expected shape
    #[error("Unexpected response from server: {message}")]
    Decode {
        /// Decoder error text
        message: String,
    },
}

impl ClientError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Network error carrying the fixed connectivity message
    pub fn network() -> Self {
        Self::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether this error means the backend was unreachable
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Whether the error was raised locally, before any request
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Unauthenticated)
    }

    /// HTTP status for server errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
