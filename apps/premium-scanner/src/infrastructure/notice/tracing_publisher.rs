//! Tracing notice sink.

use crate::application::ports::{NoticePublisherPort, PipelineNotice};

/// Notice publisher that writes each notice as a structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticePublisher;

impl NoticePublisherPort for TracingNoticePublisher {
    fn publish(&self, notice: PipelineNotice) {
        match notice {
            PipelineNotice::ChainFetched {
                instrument_name,
                expiry_date,
                entries,
            } => {
                tracing::info!(
                    instrument = %instrument_name,
                    expiry = %expiry_date,
                    entries,
                    "Option chain retrieved"
                );
            }
            PipelineNotice::EntriesRejected {
                instrument_name,
                expiry_date,
                count,
            } => {
                tracing::warn!(
                    instrument = %instrument_name,
                    expiry = %expiry_date,
                    count,
                    "Skipped malformed option chain entries"
                );
            }
            PipelineNotice::ChainFetchFailed {
                instrument_name,
                expiry_date,
                error,
            } => {
                tracing::error!(
                    instrument = %instrument_name,
                    expiry = %expiry_date,
                    error = %error,
                    "Error fetching option chain"
                );
            }
            PipelineNotice::MarginResolved {
                instrument_name,
                strike_price,
                side,
                margin,
            } => {
                tracing::info!(
                    instrument = %instrument_name,
                    strike = %strike_price,
                    side = %side,
                    margin = %margin,
                    "Margin resolved"
                );
            }
            PipelineNotice::MarginMissing {
                instrument_name,
                strike_price,
                side,
            } => {
                tracing::warn!(
                    instrument = %instrument_name,
                    strike = %strike_price,
                    side = %side,
                    "Margin response had no margin value, using 0"
                );
            }
            PipelineNotice::NegativeMarginClamped {
                instrument_name,
                strike_price,
                side,
                margin,
            } => {
                tracing::warn!(
                    instrument = %instrument_name,
                    strike = %strike_price,
                    side = %side,
                    margin = %margin,
                    "Negative margin returned, using 0"
                );
            }
            PipelineNotice::MarginLookupFailed {
                instrument_name,
                strike_price,
                side,
                error,
            } => {
                tracing::error!(
                    instrument = %instrument_name,
                    strike = %strike_price,
                    side = %side,
                    error = %error,
                    "Error retrieving margin, using 0"
                );
            }
            PipelineNotice::NoData {
                instrument_name,
                expiry_date,
                side,
            } => {
                tracing::warn!(
                    instrument = %instrument_name,
                    expiry = %expiry_date,
                    side = %side,
                    "No data available to calculate margin and premium"
                );
            }
        }
    }
}
