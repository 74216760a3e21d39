//! REST API client.
//!
//! This module provides a higher-level REST client built on top of the
//! [`HttpClient`](crate::clients::HttpClient).
//!
//! - [`RestClient`]: The REST API client with `get()`, `post()`, `put()`, `patch()`, `delete()`
//! - [`RestError`]: Error type for REST API operations
//!
//! # Path Normalization
//!
//! Leading slashes are stripped (`/people/me` -> `people/me`) and empty paths
//! are rejected. Custom method suffixes such as `:batchGet` are kept as-is.
//!
//! # Retry Behavior
//!
//! Each request is attempted `num_retries + 1` times, where `num_retries`
//! comes from [`ApiConfig`](crate::ApiConfig) (default 5).

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
