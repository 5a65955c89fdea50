//! Broker API request and response types.
//!
//! These types map directly to the broker's REST API format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::ports::MarginQuery;
use crate::domain::option_chain::{OptionChainEntry, RawOptionChain};

// ============================================================================
// Option Chain
// ============================================================================

/// Query parameters for the option chain endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChainQueryParams {
    /// Underlying symbol.
    pub symbol: String,
    /// Expiry date (YYYY-MM-DD).
    pub expiry: String,
}

/// Option chain response.
///
/// Entries are kept as raw JSON so one malformed entry does not fail the
/// whole chain; each is decoded on its own in [`Self::into_chain`].
#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainResponse {
    /// Contract entries.
    pub options: Vec<serde_json::Value>,
}

/// One contract entry in the option chain response.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionEntryPayload {
    /// Side tag (`PE`, `CE`, or anything else the broker sends).
    #[serde(rename = "type")]
    pub option_type: String,
    /// Strike price.
    pub strike_price: Decimal,
    /// Bid quotes.
    #[serde(default)]
    pub bids: Vec<QuotePayload>,
    /// Ask quotes.
    #[serde(default)]
    pub asks: Vec<QuotePayload>,
}

/// A single bid or ask quote.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotePayload {
    /// Quoted price.
    pub price: Decimal,
}

impl OptionEntryPayload {
    fn into_entry(self) -> OptionChainEntry {
        OptionChainEntry::new(
            &self.option_type,
            self.strike_price,
            self.bids.into_iter().map(|q| q.price).collect(),
            self.asks.into_iter().map(|q| q.price).collect(),
        )
    }
}

impl OptionChainResponse {
    /// Decode every entry, skipping and counting the ones that don't fit the
    /// schema or exceed
    /// [`MAX_CHAIN_VALUE`](crate::domain::option_chain::MAX_CHAIN_VALUE).
    #[must_use]
    pub fn into_chain(self) -> RawOptionChain {
        let mut entries = Vec::with_capacity(self.options.len());
        let mut rejected = 0;

        for (index, raw) in self.options.into_iter().enumerate() {
            match serde_json::from_value::<OptionEntryPayload>(raw) {
                Ok(payload) => {
                    let entry = payload.into_entry();
                    if entry.is_within_bounds() {
                        entries.push(entry);
                    } else {
                        tracing::debug!(
                            index,
                            strike = %entry.strike_price,
                            "Skipping out-of-range option entry"
                        );
                        rejected += 1;
                    }
                }
                Err(e) => {
                    tracing::debug!(index, error = %e, "Skipping malformed option entry");
                    rejected += 1;
                }
            }
        }

        RawOptionChain::new(entries).with_rejected(rejected)
    }
}

// ============================================================================
// Margin
// ============================================================================

/// Query parameters for the margin endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MarginQueryParams {
    /// Underlying symbol.
    pub symbol: String,
    /// Trade direction; always `sell`.
    #[serde(rename = "type")]
    pub trade_type: &'static str,
    /// Strike price.
    pub strike: String,
    /// Side tag (`PE` / `CE`).
    #[serde(rename = "optionType")]
    pub option_type: &'static str,
}

impl From<&MarginQuery> for MarginQueryParams {
    fn from(query: &MarginQuery) -> Self {
        Self {
            symbol: query.instrument_name.as_str().to_string(),
            trade_type: "sell",
            strike: query.strike_price.normalize().to_string(),
            option_type: query.side.wire_tag(),
        }
    }
}

/// Margin response.
#[derive(Debug, Clone, Deserialize)]
pub struct MarginResponse {
    /// Margin required, absent when the broker can't price the position.
    #[serde(default)]
    pub margin: Option<Decimal>,
}

// ============================================================================
// Errors
// ============================================================================

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerErrorResponse {
    /// Error message.
    #[serde(default, alias = "error", alias = "detail")]
    pub message: Option<String>,
}
