//! HTTP client for Management API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Management API with optional retry handling.

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::{authorization_header, TokenProvider};
use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::{ErrorResponse, HttpResponse};
use crate::config::ManagementConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Management API.
///
/// The client handles:
/// - Base URI construction from the configured endpoint
/// - Default headers including User-Agent
/// - A fresh `Authorization` header from the token provider on every attempt
/// - Retry logic for 429 and 5xx responses when `tries > 1`
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URI (e.g., `https://manage.kontent.ai`).
    base_uri: String,
    /// Base path (e.g., `/v2/projects/{environment_id}`).
    base_path: String,
    default_headers: HashMap<String, String>,
    token_provider: Arc<dyn TokenProvider>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use kontent_management::{ApiKey, ManagementConfig};
    /// use kontent_management::clients::HttpClient;
    ///
    /// let config = ManagementConfig::builder()
    ///     .environment_id("975bf280-fd91-488c-994c-2f04416e5ee3".parse().unwrap())
    ///     .api_key(ApiKey::new("key").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(config.base_path(), &config).unwrap();
    /// assert_eq!(client.base_uri(), "https://manage.kontent.ai");
    /// ```
    pub fn new(base_path: impl Into<String>, config: &ManagementConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Kontent Management Rust SDK v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri: config.endpoint().as_ref().to_string(),
            base_path: base_path.into(),
            default_headers,
            token_provider: config.token_provider(),
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Management API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path);

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self
                .client
                .request(request.http_method.as_reqwest(), &url)
                .header(
                    "Authorization",
                    authorization_header(self.token_provider.as_ref()),
                );

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                attempt = tries,
                "Sending Management API request"
            );

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body = if body_text.trim().is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            let details = ErrorResponse::from_body(&response.body);
            let message = if details.message.is_empty() {
                response.body.to_string()
            } else {
                details.message.clone()
            };
            let error_reference = response.request_id().map(String::from);

            let should_retry = code == 429 || code >= 500;
            if !should_retry || tries >= request.tries {
                if should_retry && request.tries > 1 {
                    return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                        code,
                        tries: request.tries,
                        message,
                        error_reference,
                    }));
                }
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    error_reference,
                    details,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                status = code,
                attempt = tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying Management API request to {}",
                request.path
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap` with lowercased keys.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> std::time::Duration {
        // Only 429 honours Retry-After
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|seconds| std::time::Duration::try_from_secs_f64(seconds).ok())
            {
                return delay;
            }
        }
        std::time::Duration::from_secs(RETRY_WAIT_TIME)
    }
}
