//! Broker REST adapter implementing the chain source and margin service ports.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::application::ports::{
    ChainSourcePort, FetchError, MarginLookupError, MarginQuery, MarginServicePort,
};
use crate::domain::option_chain::RawOptionChain;
use crate::domain::shared::InstrumentName;

use super::api_types::{ChainQueryParams, MarginQueryParams, MarginResponse, OptionChainResponse};
use super::config::BrokerHttpConfig;
use super::error::BrokerApiError;
use super::http_client::BrokerHttpClient;

/// Broker REST adapter.
#[derive(Debug, Clone)]
pub struct BrokerApiAdapter {
    client: BrokerHttpClient,
    options_url: String,
    margin_url: String,
}

impl BrokerApiAdapter {
    /// Create a new broker adapter.
    pub fn new(config: &BrokerHttpConfig) -> Result<Self, BrokerApiError> {
        let client = BrokerHttpClient::new(config)?;
        Ok(Self {
            client,
            options_url: config.options_url.clone(),
            margin_url: config.margin_url.clone(),
        })
    }
}

#[async_trait]
impl ChainSourcePort for BrokerApiAdapter {
    async fn fetch_chain(
        &self,
        instrument_name: &InstrumentName,
        expiry_date: NaiveDate,
    ) -> Result<RawOptionChain, FetchError> {
        let params = ChainQueryParams {
            symbol: instrument_name.as_str().to_string(),
            expiry: expiry_date.format("%Y-%m-%d").to_string(),
        };

        tracing::debug!(
            instrument = %instrument_name,
            expiry = %params.expiry,
            "Requesting option chain"
        );

        let response: OptionChainResponse = self
            .client
            .get(&self.options_url, &params)
            .await
            .map_err(FetchError::from)?;

        Ok(response.into_chain())
    }
}

#[async_trait]
impl MarginServicePort for BrokerApiAdapter {
    async fn margin_required(
        &self,
        query: &MarginQuery,
    ) -> Result<Option<Decimal>, MarginLookupError> {
        let params = MarginQueryParams::from(query);

        let response: MarginResponse = self
            .client
            .get(&self.margin_url, &params)
            .await
            .map_err(MarginLookupError::from)?;

        Ok(response.margin)
    }
}
