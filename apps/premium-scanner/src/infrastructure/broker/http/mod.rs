//! Broker REST Adapter
//!
//! Implementation of `ChainSourcePort` and `MarginServicePort` over the
//! broker's HTTP API with:
//! - Bearer token authentication
//! - Retry logic with exponential backoff for transient failures
//! - Schema-checked decoding; malformed chain entries are skipped, not fatal

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::BrokerApiAdapter;
pub use config::{BrokerHttpConfig, Credentials, RetryConfig};
pub use error::BrokerApiError;
