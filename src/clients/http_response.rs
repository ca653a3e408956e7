//! HTTP response types for the Management SDK.
//!
//! This module provides the [`HttpResponse`] type and the [`ErrorResponse`]
//! body the service returns for failed calls.

use std::collections::HashMap;

use serde::Deserialize;

/// A single field-level message from a rejected payload.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ValidationErrorModel {
    /// Human-readable description of the problem.
    pub message: String,
    /// JSON path of the offending property, when the service reports one.
    #[serde(default)]
    pub path: Option<String>,
}

/// Error body returned by the Management API for non-2xx responses.
///
/// ```json
/// {
///   "request_id": "|0e91e4b4a4d6b04f89d3e1fa4e07e2e5.4e1f2c1e_",
///   "error_code": 5,
///   "message": "The provided request body is invalid. See 'validation_errors' for more information.",
///   "validation_errors": [{"message": "Name cannot be empty.", "path": "name"}]
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Summary of the failure.
    #[serde(default)]
    pub message: String,
    /// Service-side request identifier for support requests.
    #[serde(default)]
    pub request_id: Option<String>,
    /// Numeric error category.
    #[serde(default)]
    pub error_code: Option<i64>,
    /// Field-level validation messages.
    #[serde(default)]
    pub validation_errors: Vec<ValidationErrorModel>,
}

impl ErrorResponse {
    /// Parses an error body, falling back to an empty model for unexpected shapes.
    #[must_use]
    pub fn from_body(body: &serde_json::Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }
}

/// An HTTP response from the Management API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body (`{}` when empty).
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the request identifier for error reports.
    ///
    /// The `request_id` body field takes precedence over the `X-Request-Id` header.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.body
            .get("request_id")
            .and_then(serde_json::Value::as_str)
            .or_else(|| {
                self.headers
                    .get("x-request-id")
                    .and_then(|values| values.first())
                    .map(String::as_str)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 404, 422, 429, 500] {
            assert!(!HttpResponse::new(code, HashMap::new(), json!({})).is_ok());
        }
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2.5".to_string()]);

        let response = HttpResponse::new(429, headers, json!({}));
        assert!((response.retry_request_after.unwrap() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retry_after_ignores_negative_and_non_finite_values() {
        for value in ["-1", "NaN", "inf", "-inf", "later"] {
            let mut headers = HashMap::new();
            headers.insert("retry-after".to_string(), vec![value.to_string()]);

            let response = HttpResponse::new(429, headers, json!({}));
            assert!(response.retry_request_after.is_none(), "Retry-After: {value}");
        }
    }

    #[test]
    fn test_request_id_prefers_body_field() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["from-header".to_string()]);

        let response = HttpResponse::new(400, headers.clone(), json!({"request_id": "from-body"}));
        assert_eq!(response.request_id(), Some("from-body"));

        let response = HttpResponse::new(400, headers, json!({}));
        assert_eq!(response.request_id(), Some("from-header"));
    }

    #[test]
    fn test_error_response_parses_validation_errors() {
        let body = json!({
            "request_id": "req-1",
            "error_code": 5,
            "message": "The provided request body is invalid.",
            "validation_errors": [
                {"message": "Name cannot be empty.", "path": "name"},
                {"message": "Codename is already in use."}
            ]
        });

        let error = ErrorResponse::from_body(&body);
        assert_eq!(error.request_id.as_deref(), Some("req-1"));
        assert_eq!(error.error_code, Some(5));
        assert_eq!(error.validation_errors.len(), 2);
        assert_eq!(error.validation_errors[0].path.as_deref(), Some("name"));
        assert!(error.validation_errors[1].path.is_none());
    }

    #[test]
    fn test_error_response_tolerates_unexpected_body() {
        let error = ErrorResponse::from_body(&json!({"raw_body": "<html>"}));
        assert!(error.message.is_empty());
        assert!(error.validation_errors.is_empty());

        let error = ErrorResponse::from_body(&json!("text"));
        assert_eq!(error, ErrorResponse::default());
    }
}
