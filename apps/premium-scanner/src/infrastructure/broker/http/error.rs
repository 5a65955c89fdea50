//! Broker adapter error types.

use thiserror::Error;

use crate::application::ports::{FetchError, MarginLookupError};

/// Errors from the broker REST adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerApiError {
    /// HTTP client could not be built or the request was invalid.
    #[error("HTTP error: {0}")]
    Http(String),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Authentication failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested retry delay in seconds.
        retry_after_secs: u64,
    },

    /// Network error (retryable).
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Max retries exceeded.
    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Failure seen on the final attempt.
        last_error: String,
    },
}

impl BrokerApiError {
    /// HTTP status associated with this error, when there is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::AuthenticationFailed => Some(401),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

impl From<BrokerApiError> for FetchError {
    fn from(err: BrokerApiError) -> Self {
        match err {
            BrokerApiError::JsonParse(message) => Self::Malformed { message },
            BrokerApiError::Api { status, message } => Self::Status { status, message },
            other @ (BrokerApiError::AuthenticationFailed | BrokerApiError::RateLimited { .. }) => {
                Self::Status {
                    status: other.status().unwrap_or_default(),
                    message: other.to_string(),
                }
            }
            BrokerApiError::Http(message) | BrokerApiError::Network(message) => {
                Self::ConnectionError { message }
            }
            other @ BrokerApiError::MaxRetriesExceeded { .. } => Self::ConnectionError {
                message: other.to_string(),
            },
        }
    }
}

impl From<BrokerApiError> for MarginLookupError {
    fn from(err: BrokerApiError) -> Self {
        match FetchError::from(err) {
            FetchError::ConnectionError { message } => Self::ConnectionError { message },
            FetchError::Status { status, message } => Self::Status { status, message },
            FetchError::Malformed { message } => Self::Malformed { message },
        }
    }
}
