//! HTTP client types for Management API communication.
//!
//! This module provides the transport layer for making authenticated requests
//! to the Management API. It handles request/response processing, retry logic
//! and error body parsing.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`ErrorResponse`]: The error body returned for failed calls
//! - [`rest::RestClient`]: Environment-scoped REST client
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use kontent_management::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(config.base_path(), &config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "languages")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **5xx (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ErrorResponse, HttpResponse, ValidationErrorModel};

pub use rest::{RestClient, RestError};
