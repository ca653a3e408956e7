//! REST client for the Management API.
//!
//! This module provides a higher-level client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) that roots every request at the
//! configured environment.
//!
//! - [`RestClient`]: The REST client with `get()`, `post()`, `patch()`, `delete()`
//! - [`RestError`]: Error type for REST operations
//!
//! # Path Normalization
//!
//! Leading and trailing slashes are stripped: `/languages/` -> `languages`.
//! Paths that are empty after stripping are rejected before any request is made.
//!
//! # Retry Behavior
//!
//! GET requests are attempted up to `ManagementConfig::tries` times on 429 and
//! 5xx responses. POST, PATCH and DELETE are never retried.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
