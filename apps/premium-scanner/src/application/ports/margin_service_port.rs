//! Margin Service Port (Driven Port)
//!
//! Interface for the broker's margin calculator.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::option_chain::QuoteRecord;
use crate::domain::shared::{InstrumentName, OptionSide};

/// Margin requirement query for selling one contract.
///
/// The pipeline only models short options, so every query is a sell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarginQuery {
    /// Underlying instrument.
    pub instrument_name: InstrumentName,
    /// Strike price.
    pub strike_price: Decimal,
    /// Option side.
    pub side: OptionSide,
}

impl MarginQuery {
    /// Build the sell-side query for a quote record.
    #[must_use]
    pub fn for_short(record: &QuoteRecord) -> Self {
        Self {
            instrument_name: record.instrument_name().clone(),
            strike_price: record.strike_price(),
            side: record.side(),
        }
    }
}

/// Margin lookup error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarginLookupError {
    /// Transport failure (connect, timeout, retries exhausted).
    #[error("Margin lookup connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Non-success HTTP status.
    #[error("Margin lookup failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error body or reason.
        message: String,
    },

    /// Body could not be decoded.
    #[error("Margin response malformed: {message}")]
    Malformed {
        /// Decoder message.
        message: String,
    },
}

/// Port for margin requirement lookups.
#[async_trait]
pub trait MarginServicePort: Send + Sync {
    /// Look up the margin for a short position.
    ///
    /// `Ok(None)` means the service answered without a margin value.
    async fn margin_required(&self, query: &MarginQuery)
    -> Result<Option<Decimal>, MarginLookupError>;
}
