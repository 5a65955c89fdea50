//! Per-strike record types produced by the scan pipeline.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::shared::{InstrumentName, OptionSide};

/// Best available price at one strike for one side.
///
/// `price` is the best bid for puts and the best ask for calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRecord {
    instrument_name: InstrumentName,
    strike_price: Decimal,
    side: OptionSide,
    price: Decimal,
}

impl QuoteRecord {
    /// Create a new quote record.
    #[must_use]
    pub const fn new(
        instrument_name: InstrumentName,
        strike_price: Decimal,
        side: OptionSide,
        price: Decimal,
    ) -> Self {
        Self {
            instrument_name,
            strike_price,
            side,
            price,
        }
    }

    /// Underlying instrument.
    #[must_use]
    pub const fn instrument_name(&self) -> &InstrumentName {
        &self.instrument_name
    }

    /// Strike price.
    #[must_use]
    pub const fn strike_price(&self) -> Decimal {
        self.strike_price
    }

    /// Option side.
    #[must_use]
    pub const fn side(&self) -> OptionSide {
        self.side
    }

    /// Selected bid/ask price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Premium received for selling one lot at this price.
    ///
    /// Saturates at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
    #[must_use]
    pub fn premium_for(&self, lot_size: u32) -> Decimal {
        self.price.saturating_mul(Decimal::from(lot_size))
    }
}

/// A quote record with its margin requirement and premium earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    quote: QuoteRecord,
    margin_required: Decimal,
    premium_earned: Decimal,
}

impl EnrichedRecord {
    /// Enrich a quote with a margin value, computing premium from `lot_size`.
    ///
    /// Negative margins are clamped to zero.
    #[must_use]
    pub fn new(quote: QuoteRecord, margin_required: Decimal, lot_size: u32) -> Self {
        let premium_earned = quote.premium_for(lot_size);
        Self {
            quote,
            margin_required: margin_required.max(Decimal::ZERO),
            premium_earned,
        }
    }

    /// The underlying quote record.
    #[must_use]
    pub const fn quote(&self) -> &QuoteRecord {
        &self.quote
    }

    /// Margin required to sell one lot.
    #[must_use]
    pub const fn margin_required(&self) -> Decimal {
        self.margin_required
    }

    /// Premium earned for one lot (`price × lot_size`).
    #[must_use]
    pub const fn premium_earned(&self) -> Decimal {
        self.premium_earned
    }
}
