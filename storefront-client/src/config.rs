//! Client configuration

use std::time::Duration;

/// Client configuration for connecting to the storefront backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("https://shop.example.com")
            .with_token("abc")
            .with_timeout(Duration::from_millis(1500));
        assert_eq!(config.base_url, "https://shop.example.com");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_default_points_at_localhost() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.token.is_none());
    }
}
