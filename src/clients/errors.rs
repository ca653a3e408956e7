//! HTTP-specific error types for the Management SDK.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use kontent_management::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::MaxRetries(e)) => println!("Retries exhausted after {} tries", e.tries),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use thiserror::Error;

use crate::clients::http_response::ErrorResponse;

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use kontent_management::clients::{ErrorResponse, HttpResponseError};
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "The requested language 'de-DE' was not found.".to_string(),
///     error_reference: Some("req-123".to_string()),
///     details: ErrorResponse::default(),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 404: The requested language 'de-DE' was not found.");
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The service's error message, or the raw body when none was provided.
    pub message: String,
    /// Request identifier for error reporting.
    pub error_reference: Option<String>,
    /// The parsed error body, including field-level validation messages.
    pub details: ErrorResponse,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a read continues to fail with 429 or 5xx responses after all
/// configured attempts.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
    /// Request identifier for error reporting.
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET request was given a body.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that does not allow a body.
        method: String,
    },

    /// The request was configured with zero attempts.
    #[error("A request must be attempted at least once.")]
    ZeroTries,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network, TLS or timeout error from the transport.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
