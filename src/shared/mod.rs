//! Shared Module
//!
//! This module contains the platform-agnostic types used by both the HTTP
//! client and the state store: wire models, the error type and the
//! configuration builder.
//!
//! # Overview
//!
//! Nothing in here performs I/O beyond reading an optional config file.
//! All payload types are serde schemas with their defaulting rules baked in.

/// Wire models for every backend payload
pub mod models;

/// Client error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{ClientError, NETWORK_ERROR_MESSAGE};
