//! HTTP client wrapper with retry logic.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api_types::BrokerErrorResponse;
use super::config::{BrokerHttpConfig, RetryConfig};
use super::error::BrokerApiError;

/// HTTP client for the broker API with retry logic.
#[derive(Debug, Clone)]
pub struct BrokerHttpClient {
    client: Client,
    bearer: String,
    retry_config: RetryConfig,
}

impl BrokerHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &BrokerHttpConfig) -> Result<Self, BrokerApiError> {
        if config.credentials.is_empty() {
            return Err(BrokerApiError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BrokerApiError::Http(e.to_string()))?;

        Ok(Self {
            client,
            bearer: format!("Bearer {}", config.credentials.api_token()),
            retry_config: config.retry.clone(),
        })
    }

    /// Make a GET request with query parameters and decode the JSON body.
    pub async fn get<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        url: &str,
        query: &Q,
    ) -> Result<T, BrokerApiError> {
        let mut backoff = ExponentialBackoff::new(&self.retry_config);

        loop {
            let request = self
                .client
                .get(url)
                .header(reqwest::header::AUTHORIZATION, &self.bearer)
                .query(query);

            let response = match request.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            error = %e,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt,
                            "Network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    if backoff.attempt <= 1 {
                        return Err(BrokerApiError::Network(e.to_string()));
                    }
                    return Err(BrokerApiError::MaxRetriesExceeded {
                        attempts: backoff.attempt,
                        last_error: e.to_string(),
                    });
                }
            };

            let status = response.status();

            if status.is_success() {
                let text = response
                    .text()
                    .await
                    .map_err(|e| BrokerApiError::Network(e.to_string()))?;
                return serde_json::from_str(&text)
                    .map_err(|e| BrokerApiError::JsonParse(e.to_string()));
            }

            // Handle error response
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let error_body = response.text().await.unwrap_or_default();

            let error_message = serde_json::from_str::<BrokerErrorResponse>(&error_body)
                .ok()
                .and_then(|err| err.message)
                .unwrap_or(error_body);

            // Categorize and handle error
            match categorize_status(status) {
                ErrorCategory::RateLimited => {
                    let delay = backoff.next_backoff().map(|d| {
                        rate_limit_delay(d, retry_after, self.retry_config.max_backoff)
                    });
                    if let Some(delay) = delay {
                        tracing::warn!(
                            status = status.as_u16(),
                            delay_ms = delay.as_millis(),
                            "Rate limited, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(BrokerApiError::RateLimited {
                        retry_after_secs: retry_after.unwrap_or(60),
                    });
                }
                ErrorCategory::Retryable => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            status = status.as_u16(),
                            message = %error_message,
                            delay_ms = delay.as_millis(),
                            "Retryable error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(BrokerApiError::Api {
                        status: status.as_u16(),
                        message: error_message,
                    });
                }
                ErrorCategory::NonRetryable => {
                    return match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            Err(BrokerApiError::AuthenticationFailed)
                        }
                        _ => Err(BrokerApiError::Api {
                            status: status.as_u16(),
                            message: error_message,
                        }),
                    };
                }
            }
        }
    }
}

/// Error category for determining retry behavior.
enum ErrorCategory {
    RateLimited,
    Retryable,
    NonRetryable,
}

/// Categorize HTTP status code for retry handling.
const fn categorize_status(status: StatusCode) -> ErrorCategory {
    match status.as_u16() {
        429 => ErrorCategory::RateLimited,
        408 | 500 | 502 | 503 | 504 => ErrorCategory::Retryable,
        _ => ErrorCategory::NonRetryable,
    }
}

/// Delay before retrying a 429: the broker's `Retry-After` when given,
/// otherwise the computed backoff, never longer than `max_backoff`.
fn rate_limit_delay(
    backoff: Duration,
    retry_after_secs: Option<u64>,
    max_backoff: Duration,
) -> Duration {
    retry_after_secs
        .map_or(backoff, Duration::from_secs)
        .min(max_backoff)
}

/// Exponential backoff calculator.
struct ExponentialBackoff {
    attempt: u32,
    max_attempts: u32,
    current_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
}

impl ExponentialBackoff {
    const fn new(config: &RetryConfig) -> Self {
        Self {
            attempt: 0,
            max_attempts: config.max_attempts,
            current_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            multiplier: config.multiplier,
        }
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            return None;
        }

        let backoff = self.current_backoff;
        self.current_backoff = Duration::from_secs_f64(
            (self.current_backoff.as_secs_f64() * self.multiplier)
                .min(self.max_backoff.as_secs_f64()),
        );

        Some(backoff)
    }
}
