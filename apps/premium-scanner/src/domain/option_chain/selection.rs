//! Best-price selection over a raw option chain.
//!
//! Puts are priced at the highest bid, calls at the highest ask. When several
//! quotes share the maximal price any one of them may be returned; only the
//! price is observable, so callers must not depend on which quote won.

use rust_decimal::Decimal;

use super::{OptionChainEntry, QuoteRecord, RawOptionChain};
use crate::domain::shared::{InstrumentName, OptionSide};

/// Best price for `side` on a single entry.
///
/// Returns `None` when the entry is for the other side, has an unknown tag,
/// or has no quotes on the relevant book side.
#[must_use]
pub fn best_price(entry: &OptionChainEntry, side: OptionSide) -> Option<Decimal> {
    if entry.side != Some(side) {
        return None;
    }
    entry.quotes_for(side).iter().copied().max()
}

/// Build one [`QuoteRecord`] per matching entry, preserving source order.
#[must_use]
pub fn select_best_quotes(
    instrument_name: &InstrumentName,
    side: OptionSide,
    chain: &RawOptionChain,
) -> Vec<QuoteRecord> {
    chain
        .entries
        .iter()
        .filter_map(|entry| {
            best_price(entry, side).map(|price| {
                QuoteRecord::new(instrument_name.clone(), entry.strike_price, side, price)
            })
        })
        .collect()
}
