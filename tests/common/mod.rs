//! Common test utilities and helpers
//!
//! - A scripted in-memory backend with call recording and failure injection
//! - Model fixtures
//! - Custom assertion macros

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod fake_backend;
pub mod fixtures;

pub use fake_backend::*;
pub use fixtures::*;
