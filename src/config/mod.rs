//! Configuration types for the Kontent.ai Management SDK.
//!
//! # Overview
//!
//! - [`ManagementConfig`]: The configuration handed to the client at construction
//! - [`ManagementConfigBuilder`]: A builder for constructing [`ManagementConfig`] instances
//! - [`ApiKey`]: A validated Management API key with masked debug output
//! - [`EnvironmentId`]: The environment (project) the client operates on
//! - [`EndpointUrl`]: A validated base URL of the Management API
//!
//! There is no process-wide configuration. Each client owns its own copy.
//!
//! # Example
//!
//! ```rust
//! use kontent_management::{ManagementConfig, ApiKey};
//!
//! let config = ManagementConfig::builder()
//!     .environment_id("975bf280-fd91-488c-994c-2f04416e5ee3".parse().unwrap())
//!     .api_key(ApiKey::new("my-management-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_path(), "/v2/projects/975bf280-fd91-488c-994c-2f04416e5ee3");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, EndpointUrl, EnvironmentId};

use std::sync::Arc;

use crate::auth::TokenProvider;
use crate::error::ConfigError;

/// The Management API version used to build request paths.
pub const API_VERSION: &str = "v2";

/// Configuration for the Management API client.
///
/// # Thread Safety
///
/// `ManagementConfig` is `Clone`, `Send`, and `Sync`. The token provider is
/// shared between clones.
#[derive(Clone, Debug)]
pub struct ManagementConfig {
    environment_id: EnvironmentId,
    token_provider: Arc<dyn TokenProvider>,
    endpoint: EndpointUrl,
    tries: u32,
    user_agent_prefix: Option<String>,
}

impl ManagementConfig {
    /// Creates a new builder for constructing a `ManagementConfig`.
    #[must_use]
    pub fn builder() -> ManagementConfigBuilder {
        ManagementConfigBuilder::new()
    }

    /// Returns the environment identifier.
    #[must_use]
    pub const fn environment_id(&self) -> &EnvironmentId {
        &self.environment_id
    }

    /// Returns the token provider used to authorize requests.
    #[must_use]
    pub fn token_provider(&self) -> Arc<dyn TokenProvider> {
        Arc::clone(&self.token_provider)
    }

    /// Returns the API endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Returns how many times read requests are attempted on 429 and 5xx responses.
    ///
    /// Writes are always attempted exactly once.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the base path all resource paths are appended to.
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("/{API_VERSION}/projects/{}", self.environment_id)
    }
}

// Verify ManagementConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ManagementConfig>();
};

/// Builder for constructing [`ManagementConfig`] instances.
///
/// Required fields are the environment ID and either an API key or a custom
/// token provider.
///
/// # Defaults
///
/// - `endpoint`: `https://manage.kontent.ai`
/// - `tries`: `1` (no retries)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ManagementConfigBuilder {
    environment_id: Option<EnvironmentId>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    endpoint: Option<EndpointUrl>,
    tries: Option<u32>,
    user_agent_prefix: Option<String>,
}

impl ManagementConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the environment ID (required).
    #[must_use]
    pub const fn environment_id(mut self, id: EnvironmentId) -> Self {
        self.environment_id = Some(id);
        self
    }

    /// Authorizes requests with a Management API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.token_provider = Some(Arc::new(key));
        self
    }

    /// Authorizes requests with a custom token provider.
    ///
    /// Replaces any API key set earlier.
    #[must_use]
    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Overrides the API endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets how many times read requests are attempted.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ManagementConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the environment ID or
    /// credentials are not set, and [`ConfigError::InvalidTries`] for zero tries.
    pub fn build(self) -> Result<ManagementConfig, ConfigError> {
        let environment_id = self
            .environment_id
            .ok_or(ConfigError::MissingRequiredField {
                field: "environment_id",
            })?;
        let token_provider = self
            .token_provider
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(ManagementConfig {
            environment_id,
            token_provider,
            endpoint: self.endpoint.unwrap_or_default(),
            tries,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVIRONMENT: &str = "975bf280-fd91-488c-994c-2f04416e5ee3";

    fn environment_id() -> EnvironmentId {
        ENVIRONMENT.parse().unwrap()
    }

    #[test]
    fn test_builder_requires_environment_id() {
        let result = ManagementConfigBuilder::new()
            .api_key(ApiKey::new("key").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "environment_id"
            })
        ));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = ManagementConfigBuilder::new()
            .environment_id(environment_id())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_rejects_zero_tries() {
        let result = ManagementConfig::builder()
            .environment_id(environment_id())
            .api_key(ApiKey::new("key").unwrap())
            .tries(0)
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidTries { tries: 0 })));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ManagementConfig::builder()
            .environment_id(environment_id())
            .api_key(ApiKey::new("key").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.endpoint().as_ref(), "https://manage.kontent.ai");
        assert_eq!(config.tries(), 1);
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.base_path(), format!("/v2/projects/{ENVIRONMENT}"));
    }

    #[test]
    fn test_debug_does_not_leak_api_key() {
        let config = ManagementConfig::builder()
            .environment_id(environment_id())
            .api_key(ApiKey::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ManagementConfig"));
        assert!(!debug_str.contains("very-secret"));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ManagementConfig::builder()
            .environment_id(environment_id())
            .api_key(ApiKey::new("key").unwrap())
            .endpoint(EndpointUrl::new("http://localhost:3000").unwrap())
            .tries(3)
            .user_agent_prefix("MyImporter/1.0")
            .build()
            .unwrap();

        assert_eq!(config.endpoint().as_ref(), "http://localhost:3000");
        assert_eq!(config.tries(), 3);
        assert_eq!(config.user_agent_prefix(), Some("MyImporter/1.0"));
        assert_eq!(config.token_provider().bearer_token(), "key");
    }
}
