//! Notice Publisher Port (Driven Port)
//!
//! Side channel for reporting what the pipeline recovered from. Publishing a
//! notice never changes a pipeline result; the fallback values are decided
//! before the notice is sent.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{FetchError, MarginLookupError};
use crate::domain::shared::{InstrumentName, OptionSide};

/// Severity of a pipeline notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticeLevel {
    /// Normal progress.
    Info,
    /// Degraded but defined outcome.
    Warning,
    /// A collaborator call failed and a fallback was used.
    Error,
}

/// Something the pipeline wants reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineNotice {
    /// Chain retrieved and decoded.
    ChainFetched {
        /// Instrument.
        instrument_name: InstrumentName,
        /// Expiry.
        expiry_date: NaiveDate,
        /// Number of decoded entries.
        entries: usize,
    },

    /// Some chain entries did not match the schema and were dropped.
    EntriesRejected {
        /// Instrument.
        instrument_name: InstrumentName,
        /// Expiry.
        expiry_date: NaiveDate,
        /// Number of dropped entries.
        count: usize,
    },

    /// Chain retrieval failed; extraction yields no records.
    ChainFetchFailed {
        /// Instrument.
        instrument_name: InstrumentName,
        /// Expiry.
        expiry_date: NaiveDate,
        /// Underlying failure.
        error: FetchError,
    },

    /// Margin lookup returned a value.
    MarginResolved {
        /// Instrument.
        instrument_name: InstrumentName,
        /// Strike.
        strike_price: Decimal,
        /// Side.
        side: OptionSide,
        /// Margin returned by the service.
        margin: Decimal,
    },

    /// Margin service answered without a margin value; zero used.
    MarginMissing {
        /// Instrument.
        instrument_name: InstrumentName,
        /// Strike.
        strike_price: Decimal,
        /// Side.
        side: OptionSide,
    },

    /// Margin service returned a negative value; zero used.
    NegativeMarginClamped {
        /// Instrument.
        instrument_name: InstrumentName,
        /// Strike.
        strike_price: Decimal,
        /// Side.
        side: OptionSide,
        /// Value as returned.
        margin: Decimal,
    },

    /// Margin lookup failed; zero used.
    MarginLookupFailed {
        /// Instrument.
        instrument_name: InstrumentName,
        /// Strike.
        strike_price: Decimal,
        /// Side.
        side: OptionSide,
        /// Underlying failure.
        error: MarginLookupError,
    },

    /// Extraction produced no records; enrichment skipped.
    NoData {
        /// Instrument.
        instrument_name: InstrumentName,
        /// Expiry.
        expiry_date: NaiveDate,
        /// Requested side.
        side: OptionSide,
    },
}

impl PipelineNotice {
    /// Severity of this notice.
    #[must_use]
    pub const fn level(&self) -> NoticeLevel {
        match self {
            Self::ChainFetched { .. } | Self::MarginResolved { .. } => NoticeLevel::Info,
            Self::EntriesRejected { .. }
            | Self::MarginMissing { .. }
            | Self::NegativeMarginClamped { .. }
            | Self::NoData { .. } => NoticeLevel::Warning,
            Self::ChainFetchFailed { .. } | Self::MarginLookupFailed { .. } => NoticeLevel::Error,
        }
    }
}

/// Port for publishing pipeline notices.
pub trait NoticePublisherPort: Send + Sync {
    /// Publish a notice.
    fn publish(&self, notice: PipelineNotice);
}

/// No-op notice publisher for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpNoticePublisher;

impl NoticePublisherPort for NoOpNoticePublisher {
    fn publish(&self, _notice: PipelineNotice) {}
}
