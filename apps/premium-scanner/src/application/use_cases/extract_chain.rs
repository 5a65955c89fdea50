//! Chain Extraction Use Case

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::ports::{ChainSourcePort, NoticePublisherPort, PipelineNotice};
use crate::domain::option_chain::{QuoteRecord, select_best_quotes};
use crate::domain::shared::{InstrumentName, OptionSide};

/// Fetches an option chain and reduces it to one best-price record per strike.
///
/// A failed fetch is not an error for the caller: it is reported as a
/// notice and the extraction yields no records.
pub struct ChainExtractor<S, N>
where
    S: ChainSourcePort,
    N: NoticePublisherPort,
{
    source: Arc<S>,
    notices: Arc<N>,
}

impl<S, N> ChainExtractor<S, N>
where
    S: ChainSourcePort,
    N: NoticePublisherPort,
{
    /// Create a new `ChainExtractor`.
    pub const fn new(source: Arc<S>, notices: Arc<N>) -> Self {
        Self { source, notices }
    }

    /// Extract best-price records for `side`.
    pub async fn extract(
        &self,
        instrument_name: &InstrumentName,
        expiry_date: NaiveDate,
        side: OptionSide,
    ) -> Vec<QuoteRecord> {
        let chain = match self.source.fetch_chain(instrument_name, expiry_date).await {
            Ok(chain) => chain,
            Err(error) => {
                self.notices.publish(PipelineNotice::ChainFetchFailed {
                    instrument_name: instrument_name.clone(),
                    expiry_date,
                    error,
                });
                return Vec::new();
            }
        };

        self.notices.publish(PipelineNotice::ChainFetched {
            instrument_name: instrument_name.clone(),
            expiry_date,
            entries: chain.entries.len(),
        });

        if chain.rejected_entries > 0 {
            self.notices.publish(PipelineNotice::EntriesRejected {
                instrument_name: instrument_name.clone(),
                expiry_date,
                count: chain.rejected_entries,
            });
        }

        select_best_quotes(instrument_name, side, &chain)
    }
}
