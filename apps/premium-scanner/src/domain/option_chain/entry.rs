//! Raw option chain entries.

use rust_decimal::Decimal;

use crate::domain::shared::OptionSide;

/// Largest strike or quote a chain entry may carry (10^18).
///
/// Any value at or below this bound times any `u32` lot size fits in a
/// `Decimal`.
pub const MAX_CHAIN_VALUE: Decimal =
    Decimal::from_parts(2_808_348_672, 232_830_643, 0, false, 0);

/// One contract line of an option chain: a strike, its side, and the
/// prices currently bid and offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionChainEntry {
    /// Option side, `None` when the source tag is not `PE`/`CE`.
    pub side: Option<OptionSide>,
    /// Strike price.
    pub strike_price: Decimal,
    /// Bid prices, in the order received.
    pub bids: Vec<Decimal>,
    /// Ask prices, in the order received.
    pub asks: Vec<Decimal>,
}

impl OptionChainEntry {
    /// Create an entry from a source type tag.
    #[must_use]
    pub fn new(tag: &str, strike_price: Decimal, bids: Vec<Decimal>, asks: Vec<Decimal>) -> Self {
        Self {
            side: OptionSide::from_wire_tag(tag),
            strike_price,
            bids,
            asks,
        }
    }

    /// Check every strike and quote magnitude is within [`MAX_CHAIN_VALUE`].
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        std::iter::once(&self.strike_price)
            .chain(&self.bids)
            .chain(&self.asks)
            .all(|value| value.abs() <= MAX_CHAIN_VALUE)
    }

    /// Quotes on the book side that prices `side`: bids for puts, asks for calls.
    #[must_use]
    pub fn quotes_for(&self, side: OptionSide) -> &[Decimal] {
        match side {
            OptionSide::Put => &self.bids,
            OptionSide::Call => &self.asks,
        }
    }
}

/// A decoded option chain for one instrument and expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptionChain {
    /// Entries that matched the chain schema, in source order.
    pub entries: Vec<OptionChainEntry>,
    /// Number of source entries dropped because they did not match the schema.
    pub rejected_entries: usize,
}

impl RawOptionChain {
    /// Create a chain with no rejected entries.
    #[must_use]
    pub const fn new(entries: Vec<OptionChainEntry>) -> Self {
        Self {
            entries,
            rejected_entries: 0,
        }
    }

    /// Set the rejected entry count.
    #[must_use]
    pub const fn with_rejected(mut self, rejected_entries: usize) -> Self {
        self.rejected_entries = rejected_entries;
        self
    }
}
