//! Authentication for Management API requests.
//!
//! Every request carries an `Authorization: Bearer <token>` header. The token
//! is obtained from a [`TokenProvider`] each time a request is sent, so
//! providers that rotate keys take effect without rebuilding the client.
//!
//! [`ApiKey`](crate::ApiKey) is the provider used in most setups:
//!
//! ```rust
//! use kontent_management::ApiKey;
//! use kontent_management::auth::TokenProvider;
//!
//! let key = ApiKey::new("my-management-key").unwrap();
//! assert_eq!(key.bearer_token(), "my-management-key");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::config::ApiKey;

/// Supplies bearer credentials for Management API requests.
///
/// Implementations must be cheap to call; the token is requested once per
/// HTTP attempt. `Debug` implementations must not print the secret.
pub trait TokenProvider: Send + Sync + fmt::Debug {
    /// Returns the bearer token to send with the next request.
    fn bearer_token(&self) -> String;
}

impl TokenProvider for ApiKey {
    fn bearer_token(&self) -> String {
        self.as_ref().to_string()
    }
}

impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    fn bearer_token(&self) -> String {
        (**self).bearer_token()
    }
}

/// Formats the `Authorization` header value for a provider.
pub(crate) fn authorization_header(provider: &dyn TokenProvider) -> String {
    format!("Bearer {}", provider.bearer_token())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct RotatingToken(std::sync::atomic::AtomicUsize);

    impl TokenProvider for RotatingToken {
        fn bearer_token(&self) -> String {
            let n = self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            format!("token-{n}")
        }
    }

    #[test]
    fn test_api_key_is_token_provider() {
        let key = ApiKey::new("abc").unwrap();
        assert_eq!(authorization_header(&key), "Bearer abc");
    }

    #[test]
    fn test_provider_is_asked_on_every_call() {
        let provider = RotatingToken(std::sync::atomic::AtomicUsize::new(0));
        assert_eq!(authorization_header(&provider), "Bearer token-0");
        assert_eq!(authorization_header(&provider), "Bearer token-1");
    }

    #[test]
    fn test_arc_provider_delegates() {
        let provider: Arc<dyn TokenProvider> = Arc::new(ApiKey::new("shared").unwrap());
        assert_eq!(provider.bearer_token(), "shared");
    }
}
