//! Chain Source Port (Driven Port)
//!
//! Interface for retrieving an option chain snapshot.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::option_chain::RawOptionChain;
use crate::domain::shared::InstrumentName;

/// Option chain retrieval error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport failure (connect, timeout, retries exhausted).
    #[error("Chain fetch connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Non-success HTTP status.
    #[error("Chain fetch failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error body or reason.
        message: String,
    },

    /// Body could not be decoded into a chain.
    #[error("Chain response malformed: {message}")]
    Malformed {
        /// Decoder message.
        message: String,
    },
}

/// Port for retrieving option chains.
#[async_trait]
pub trait ChainSourcePort: Send + Sync {
    /// Fetch the chain for an instrument and expiry.
    async fn fetch_chain(
        &self,
        instrument_name: &InstrumentName,
        expiry_date: NaiveDate,
    ) -> Result<RawOptionChain, FetchError>;
}
