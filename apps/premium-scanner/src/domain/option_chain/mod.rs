//! Option Chain Bounded Context
//!
//! Raw chain entries as received from the broker, the normalized per-strike
//! [`QuoteRecord`], and the margin/premium [`EnrichedRecord`].

mod entry;
mod records;
pub mod selection;

pub use entry::{MAX_CHAIN_VALUE, OptionChainEntry, RawOptionChain};
pub use records::{EnrichedRecord, QuoteRecord};
pub use selection::{best_price, select_best_quotes};
