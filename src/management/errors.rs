//! Error types for Management API operations.
//!
//! The client maps failures to semantic variants:
//!
//! - **local**: [`ManagementError::InvalidReference`], [`ManagementError::InvalidPatchOperation`].
//!   These are raised before any request is sent and are never retried.
//! - **404**: [`ManagementError::NotFound`]
//! - **400 / 422 with validation errors**: [`ManagementError::Validation`]
//! - **anything else**: [`ManagementError::Http`], carrying the transport error unchanged
//!
//! # Example
//!
//! ```rust,ignore
//! use kontent_management::{ManagementError, Reference};
//!
//! match client.languages().get(&Reference::by_codename("de-DE")).await {
//!     Ok(language) => println!("Found: {}", language.name),
//!     Err(ManagementError::NotFound { resource, reference }) => {
//!         println!("{resource} with {reference:?} does not exist");
//!     }
//!     Err(ManagementError::Validation { errors, .. }) => {
//!         for error in errors {
//!             println!("{}", error.message);
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, RestError, ValidationErrorModel};
use crate::management::patch::InvalidPatchOperationError;
use crate::management::reference::{InvalidReferenceError, Reference};

/// Error type for Management API operations.
#[derive(Debug, Error)]
pub enum ManagementError {
    /// A reference could not address a resource.
    #[error(transparent)]
    InvalidReference(#[from] InvalidReferenceError),

    /// A patch operation does not fit the resource schema.
    #[error(transparent)]
    InvalidPatchOperation(#[from] InvalidPatchOperationError),

    /// The service reported that the resource does not exist (HTTP 404).
    #[error("{resource} with {} not found", describe_reference(.reference))]
    NotFound {
        /// Resource family name (e.g., "Language").
        resource: &'static str,
        /// The reference that was requested, if the call addressed one.
        reference: Option<Reference>,
    },

    /// The service rejected the payload (HTTP 400 or 422).
    #[error("Validation failed: {message}")]
    Validation {
        /// Summary from the service.
        message: String,
        /// Field-level validation messages.
        errors: Vec<ValidationErrorModel>,
        /// Service request identifier.
        request_id: Option<String>,
    },

    /// A request path was empty after normalization.
    #[error("Invalid Management API path: {path}")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// Any other transport or HTTP failure, surfaced unchanged.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A payload could not be serialized.
    #[error("Failed to serialize {resource} payload: {source}")]
    Serialization {
        /// Resource family name.
        resource: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The response body could not be mapped to the expected model.
    #[error("Failed to parse {resource} response: {source}")]
    Deserialization {
        /// Resource family name.
        resource: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ManagementError {
    /// Maps a REST error into a semantic error for `resource`.
    ///
    /// - 404 -> `NotFound`
    /// - 400/422 carrying validation errors -> `Validation`
    /// - everything else -> `Http`
    #[must_use]
    pub fn from_rest_error(
        error: RestError,
        resource: &'static str,
        reference: Option<&Reference>,
    ) -> Self {
        match error {
            RestError::Http(http) => Self::from_http_error(http, resource, reference),
            other => other.into(),
        }
    }

    /// Maps an HTTP error into a semantic error for `resource`.
    #[must_use]
    pub fn from_http_error(
        error: HttpError,
        resource: &'static str,
        reference: Option<&Reference>,
    ) -> Self {
        match error {
            HttpError::Response(response) if response.code == 404 => Self::NotFound {
                resource,
                reference: reference.cloned(),
            },
            HttpError::Response(response)
                if matches!(response.code, 400 | 422)
                    && !response.details.validation_errors.is_empty() =>
            {
                Self::Validation {
                    message: response.message,
                    errors: response.details.validation_errors,
                    request_id: response.error_reference,
                }
            }
            other => Self::Http(other),
        }
    }

    /// Returns `true` for errors raised before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidReference(_) | Self::InvalidPatchOperation(_) | Self::InvalidPath { .. }
        )
    }

    /// Returns the service request identifier, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Validation { request_id, .. } => request_id.as_deref(),
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            Self::Http(HttpError::MaxRetries(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

impl From<RestError> for ManagementError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Http(http) => Self::Http(http),
            RestError::InvalidPath { path } => Self::InvalidPath { path },
        }
    }
}

fn describe_reference(reference: &Option<Reference>) -> String {
    reference
        .as_ref()
        .map_or_else(|| "the given reference".to_string(), ToString::to_string)
}
