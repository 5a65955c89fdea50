//! Broker adapter configuration.

use std::time::Duration;

/// Default option chain endpoint.
pub const DEFAULT_OPTIONS_URL: &str = "https://api.broker.com/options";

/// Default margin calculator endpoint.
pub const DEFAULT_MARGIN_URL: &str = "https://api.broker.com/margin";

/// Broker API credentials.
#[derive(Clone)]
pub struct Credentials {
    api_token: String,
}

impl Credentials {
    /// Create new credentials from a bearer token.
    #[must_use]
    pub const fn new(api_token: String) -> Self {
        Self { api_token }
    }

    /// Get the bearer token.
    #[must_use]
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Check if the token is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.api_token.trim().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for the broker REST adapter.
#[derive(Debug, Clone)]
pub struct BrokerHttpConfig {
    /// API credentials.
    pub credentials: Credentials,
    /// Option chain endpoint URL.
    pub options_url: String,
    /// Margin calculator endpoint URL.
    pub margin_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retry policy configuration.
    pub retry: RetryConfig,
}

impl BrokerHttpConfig {
    /// Create a new configuration against the default endpoints.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            options_url: DEFAULT_OPTIONS_URL.to_string(),
            margin_url: DEFAULT_MARGIN_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }

    /// Set both endpoint URLs.
    #[must_use]
    pub fn with_endpoints(mut self, options_url: impl Into<String>, margin_url: impl Into<String>) -> Self {
        self.options_url = options_url.into();
        self.margin_url = margin_url.into();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl RetryConfig {
    /// Single attempt, no retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}
