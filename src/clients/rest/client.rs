//! REST client for the Management API.
//!
//! This module provides the [`RestClient`] type, which scopes requests to an
//! environment, normalizes resource paths and applies the configured retry
//! policy to reads.

use std::collections::HashMap;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::ManagementConfig;

/// REST client for the Management API.
///
/// Provides `get`, `post`, `patch` and `delete` helpers over an
/// [`HttpClient`] rooted at `/v2/projects/{environment_id}`.
///
/// Reads are attempted up to [`ManagementConfig::tries`] times. Writes are
/// attempted exactly once.
///
/// # Example
///
/// ```rust,ignore
/// use kontent_management::{ApiKey, ManagementConfig};
/// use kontent_management::clients::RestClient;
///
/// let config = ManagementConfig::builder()
///     .environment_id("975bf280-fd91-488c-994c-2f04416e5ee3".parse()?)
///     .api_key(ApiKey::new("key")?)
///     .build()?;
///
/// let client = RestClient::new(&config)?;
/// let response = client.get("languages", None).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    read_tries: u32,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client for the configured environment.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the underlying HTTP client cannot be built.
    pub fn new(config: &ManagementConfig) -> Result<Self, RestError> {
        let base_path = config.base_path();
        tracing::debug!(
            base_path = %base_path,
            endpoint = config.endpoint().as_ref(),
            "Creating Management API REST client"
        );

        let http_client = HttpClient::new(base_path, config)?;

        Ok(Self {
            http_client,
            read_tries: config.tries(),
        })
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The resource path (e.g., "languages", "types/codename/article")
    /// * `headers` - Optional extra request headers (e.g., `x-continuation`)
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn get(
        &self,
        path: &str,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, headers, self.read_tries)
            .await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, Some(body), None, 1)
            .await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Patch, path, Some(body), None, 1)
            .await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete(&self, path: &str) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, None, 1)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        headers: Option<HashMap<String, String>>,
        tries: u32,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, normalized_path).tries(tries);

        if let Some(body_value) = body {
            builder = builder.body(body_value);
        }

        if let Some(headers) = headers {
            for (key, value) in headers {
                builder = builder.header(key, value);
            }
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}

/// Strips leading and trailing slashes from a resource path.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(trimmed.to_string())
}
