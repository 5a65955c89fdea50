//! Scan Premium Use Case
//!
//! Runs chain extraction and margin enrichment for one instrument, expiry and
//! side. An empty extraction ends the scan with [`ScanOutcome::NoData`]
//! without touching the margin service.

use std::sync::Arc;

use chrono::NaiveDate;

use super::{ChainExtractor, MarginEnricher};
use crate::application::ports::{
    ChainSourcePort, MarginServicePort, NoticePublisherPort, PipelineNotice,
};
use crate::domain::option_chain::EnrichedRecord;
use crate::domain::shared::{InstrumentName, OptionSide};

/// What to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Underlying instrument.
    pub instrument_name: InstrumentName,
    /// Option expiry.
    pub expiry_date: NaiveDate,
    /// Side to price.
    pub side: OptionSide,
}

impl ScanRequest {
    /// Create a new scan request.
    #[must_use]
    pub const fn new(
        instrument_name: InstrumentName,
        expiry_date: NaiveDate,
        side: OptionSide,
    ) -> Self {
        Self {
            instrument_name,
            expiry_date,
            side,
        }
    }
}

/// Result of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Enriched table, one row per extracted strike.
    Enriched(Vec<EnrichedRecord>),
    /// Extraction produced no records.
    NoData,
}

impl ScanOutcome {
    /// Rows of the table; empty for [`ScanOutcome::NoData`].
    #[must_use]
    pub fn records(&self) -> &[EnrichedRecord] {
        match self {
            Self::Enriched(records) => records,
            Self::NoData => &[],
        }
    }

    /// Check if the scan ended without data.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Use case for producing the premium/margin table.
pub struct ScanPremiumUseCase<S, M, N>
where
    S: ChainSourcePort,
    M: MarginServicePort,
    N: NoticePublisherPort,
{
    extractor: ChainExtractor<S, N>,
    enricher: MarginEnricher<M, N>,
    notices: Arc<N>,
    lot_size: u32,
}

impl<S, M, N> ScanPremiumUseCase<S, M, N>
where
    S: ChainSourcePort,
    M: MarginServicePort,
    N: NoticePublisherPort,
{
    /// Create a new `ScanPremiumUseCase`.
    pub fn new(chain_source: Arc<S>, margin_service: Arc<M>, notices: Arc<N>, lot_size: u32) -> Self {
        Self {
            extractor: ChainExtractor::new(chain_source, Arc::clone(&notices)),
            enricher: MarginEnricher::new(margin_service, Arc::clone(&notices)),
            notices,
            lot_size,
        }
    }

    /// Contract multiplier used for premium.
    #[must_use]
    pub const fn lot_size(&self) -> u32 {
        self.lot_size
    }

    /// Run the scan.
    pub async fn execute(&self, request: &ScanRequest) -> ScanOutcome {
        let records = self
            .extractor
            .extract(&request.instrument_name, request.expiry_date, request.side)
            .await;

        if records.is_empty() {
            self.notices.publish(PipelineNotice::NoData {
                instrument_name: request.instrument_name.clone(),
                expiry_date: request.expiry_date,
                side: request.side,
            });
            return ScanOutcome::NoData;
        }

        tracing::debug!(
            instrument = %request.instrument_name,
            side = %request.side,
            strikes = records.len(),
            "Enriching extracted strikes"
        );

        ScanOutcome::Enriched(self.enricher.enrich(&records, self.lot_size).await)
    }
}
