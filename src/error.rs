//! Error types for the Kontent.ai Management SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use kontent_management::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Management API key cannot be empty.
    #[error("Management API key cannot be empty. Please provide a valid Kontent.ai Management API key.")]
    EmptyApiKey,

    /// Environment ID is not a valid UUID.
    #[error("Invalid environment ID '{id}'. Expected a UUID (e.g., '975bf280-fd91-488c-994c-2f04416e5ee3').")]
    InvalidEnvironmentId {
        /// The invalid identifier that was provided.
        id: String,
    },

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://manage.kontent.ai').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Number of request attempts must be at least one.
    #[error("Invalid number of tries {tries}. At least one attempt is required.")]
    InvalidTries {
        /// The rejected value.
        tries: u32,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
