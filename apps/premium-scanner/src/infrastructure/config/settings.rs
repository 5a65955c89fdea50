//! Scanner Configuration Settings
//!
//! Configuration types for the scanner, loaded from environment variables.

use std::time::Duration;

use chrono::NaiveDate;

use crate::application::use_cases::ScanRequest;
use crate::domain::shared::{InstrumentName, OptionSide};
use crate::infrastructure::broker::http::{BrokerHttpConfig, Credentials, RetryConfig};

/// Default contract multiplier (NIFTY).
pub const DEFAULT_LOT_SIZE: u32 = 75;

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed-width text table.
    #[default]
    Table,
    /// JSON array.
    Json,
}

impl OutputFormat {
    /// Parse output format from string.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// What the binary scans when run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Underlying instrument.
    pub instrument_name: InstrumentName,
    /// Option expiry.
    pub expiry_date: NaiveDate,
    /// Side to price.
    pub side: OptionSide,
    /// Output format.
    pub output: OutputFormat,
}

impl ScanSettings {
    /// Build the scan request.
    #[must_use]
    pub fn request(&self) -> ScanRequest {
        ScanRequest::new(self.instrument_name.clone(), self.expiry_date, self.side)
    }
}

/// Complete scanner configuration.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Broker adapter configuration.
    pub broker: BrokerHttpConfig,
    /// Contract multiplier used for premium.
    pub lot_size: u32,
    /// Scan parameters.
    pub scan: ScanSettings,
}

impl ScannerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if required values are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup("BROKER_API_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("BROKER_API_TOKEN".to_string()))?;

        let credentials = Credentials::new(api_token);
        if credentials.is_empty() {
            return Err(ConfigError::EmptyValue("BROKER_API_TOKEN".to_string()));
        }

        let defaults = BrokerHttpConfig::new(credentials.clone());
        let retry_defaults = RetryConfig::default();

        let initial_ms = parse_env_u64(
            &lookup,
            "BROKER_RETRY_INITIAL_MS",
            u64::try_from(retry_defaults.initial_backoff.as_millis()).unwrap_or(100),
        )?;
        let max_secs = parse_env_u64(
            &lookup,
            "BROKER_RETRY_MAX_SECS",
            retry_defaults.max_backoff.as_secs(),
        )?;

        // A zero setting still makes at least one attempt.
        let retry = RetryConfig {
            max_attempts: parse_env_u32(&lookup, "BROKER_MAX_ATTEMPTS", retry_defaults.max_attempts)?
                .max(1),
            initial_backoff: Duration::from_millis(initial_ms),
            max_backoff: Duration::from_secs(max_secs),
            multiplier: retry_defaults.multiplier,
        };

        let timeout = parse_env_u64(&lookup, "BROKER_HTTP_TIMEOUT_SECS", defaults.timeout.as_secs())?;

        let broker = BrokerHttpConfig::new(credentials)
            .with_endpoints(
                lookup("OPTIONS_API_URL").unwrap_or(defaults.options_url),
                lookup("MARGIN_API_URL").unwrap_or(defaults.margin_url),
            )
            .with_timeout(Duration::from_secs(timeout))
            .with_retry(retry);

        let lot_size = parse_env_u32(&lookup, "LOT_SIZE", DEFAULT_LOT_SIZE)?;
        if lot_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "LOT_SIZE".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let instrument_name =
            InstrumentName::parse(lookup("SCAN_INSTRUMENT").unwrap_or_else(|| "NIFTY".to_string()))
                .map_err(|e| ConfigError::InvalidValue {
                    key: "SCAN_INSTRUMENT".to_string(),
                    message: e.to_string(),
                })?;

        let expiry_date = match lookup("SCAN_EXPIRY") {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
                ConfigError::InvalidValue {
                    key: "SCAN_EXPIRY".to_string(),
                    message: format!("expected YYYY-MM-DD: {e}"),
                }
            })?,
            None => default_expiry(),
        };

        let side = match lookup("SCAN_SIDE") {
            Some(raw) => raw.parse::<OptionSide>().map_err(|e| ConfigError::InvalidValue {
                key: "SCAN_SIDE".to_string(),
                message: e.to_string(),
            })?,
            None => OptionSide::Put,
        };

        let output = lookup("SCAN_OUTPUT")
            .map(|s| OutputFormat::from_str_case_insensitive(&s))
            .unwrap_or_default();

        Ok(Self {
            broker,
            lot_size,
            scan: ScanSettings {
                instrument_name,
                expiry_date,
                side,
                output,
            },
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable could not be parsed.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Parse failure.
        message: String,
    },
}

fn default_expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 5).unwrap_or(NaiveDate::MIN)
}

fn parse_env_u32<F>(lookup: &F, key: &str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |v| {
        v.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a non-negative integer, got '{v}'"),
        })
    })
}

fn parse_env_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |v| {
        v.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a non-negative integer, got '{v}'"),
        })
    })
}
