//! Margin Enrichment Use Case

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::ports::{
    MarginQuery, MarginServicePort, NoticePublisherPort, PipelineNotice,
};
use crate::domain::option_chain::{EnrichedRecord, QuoteRecord};

/// Attaches sell-side margin and premium earned to each quote record.
///
/// Exactly one margin query is issued per record, sequentially and in input
/// order. A failed or empty lookup degrades that record's margin to zero and
/// never aborts the batch.
pub struct MarginEnricher<M, N>
where
    M: MarginServicePort,
    N: NoticePublisherPort,
{
    margin_service: Arc<M>,
    notices: Arc<N>,
}

impl<M, N> MarginEnricher<M, N>
where
    M: MarginServicePort,
    N: NoticePublisherPort,
{
    /// Create a new `MarginEnricher`.
    pub const fn new(margin_service: Arc<M>, notices: Arc<N>) -> Self {
        Self {
            margin_service,
            notices,
        }
    }

    /// Enrich every record. Output order and length match the input.
    pub async fn enrich(&self, records: &[QuoteRecord], lot_size: u32) -> Vec<EnrichedRecord> {
        let mut enriched = Vec::with_capacity(records.len());

        for record in records {
            let margin = self.lookup_margin(record).await;
            enriched.push(EnrichedRecord::new(record.clone(), margin, lot_size));
        }

        enriched
    }

    async fn lookup_margin(&self, record: &QuoteRecord) -> Decimal {
        let query = MarginQuery::for_short(record);

        match self.margin_service.margin_required(&query).await {
            Ok(Some(margin)) if margin < Decimal::ZERO => {
                self.notices.publish(PipelineNotice::NegativeMarginClamped {
                    instrument_name: query.instrument_name,
                    strike_price: query.strike_price,
                    side: query.side,
                    margin,
                });
                Decimal::ZERO
            }
            Ok(Some(margin)) => {
                self.notices.publish(PipelineNotice::MarginResolved {
                    instrument_name: query.instrument_name,
                    strike_price: query.strike_price,
                    side: query.side,
                    margin,
                });
                margin
            }
            Ok(None) => {
                self.notices.publish(PipelineNotice::MarginMissing {
                    instrument_name: query.instrument_name,
                    strike_price: query.strike_price,
                    side: query.side,
                });
                Decimal::ZERO
            }
            Err(error) => {
                self.notices.publish(PipelineNotice::MarginLookupFailed {
                    instrument_name: query.instrument_name,
                    strike_price: query.strike_price,
                    side: query.side,
                    error,
                });
                Decimal::ZERO
            }
        }
    }
}
