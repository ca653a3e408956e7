//! REST-specific error types for the Management SDK.
//!
//! - [`RestError::InvalidPath`]: When a resource path fails validation
//! - [`RestError::Http`]: Wraps underlying HTTP errors
//!
//! # Example
//!
//! ```rust,ignore
//! use kontent_management::clients::rest::{RestClient, RestError};
//!
//! match client.get("languages", None).await {
//!     Ok(response) => println!("Languages: {}", response.body),
//!     Err(RestError::InvalidPath { path }) => println!("Invalid path: {}", path),
//!     Err(RestError::Http(e)) => println!("HTTP error: {}", e),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for REST operations.
///
/// # Example
///
/// ```rust
/// use kontent_management::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: "".to_string() };
/// assert!(error.to_string().contains("Invalid"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The resource path is empty after normalization.
    #[error("Invalid Management API path: {path}")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ErrorResponse, HttpResponseError, MaxHttpRetriesExceededError};

    #[test]
    fn test_invalid_path_error_includes_path_in_message() {
        let error = RestError::InvalidPath {
            path: "///".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid Management API path: ///");
    }

    #[test]
    fn test_http_error_wraps_http_response_error() {
        let error: RestError = HttpError::Response(HttpResponseError {
            code: 404,
            message: "Language not found".to_string(),
            error_reference: Some("req-1".to_string()),
            details: ErrorResponse::default(),
        })
        .into();

        assert_eq!(error.to_string(), "HTTP 404: Language not found");
        assert!(matches!(error, RestError::Http(HttpError::Response(_))));
    }

    #[test]
    fn test_http_error_wraps_retry_exhaustion() {
        let error: RestError = HttpError::MaxRetries(MaxHttpRetriesExceededError {
            code: 503,
            tries: 2,
            message: "Service Unavailable".to_string(),
            error_reference: None,
        })
        .into();

        assert!(error.to_string().contains("Exceeded maximum retry count of 2"));
    }
}
