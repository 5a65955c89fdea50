//! Port fakes shared by the use case tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::application::ports::{
    ChainSourcePort, FetchError, MarginLookupError, MarginQuery, MarginServicePort,
};
use crate::domain::option_chain::RawOptionChain;
use crate::domain::shared::InstrumentName;

/// Chain source returning a fixed result.
pub struct FixedChainSource {
    result: Result<RawOptionChain, FetchError>,
    calls: RwLock<usize>,
}

impl FixedChainSource {
    pub fn ok(chain: RawOptionChain) -> Self {
        Self {
            result: Ok(chain),
            calls: RwLock::new(0),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            result: Err(error),
            calls: RwLock::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl ChainSourcePort for FixedChainSource {
    async fn fetch_chain(
        &self,
        _instrument_name: &InstrumentName,
        _expiry_date: NaiveDate,
    ) -> Result<RawOptionChain, FetchError> {
        *self.calls.write().unwrap() += 1;
        self.result.clone()
    }
}

/// Margin service answering by strike and recording every query.
///
/// Strikes without a scripted answer get `Ok(None)`.
#[derive(Default)]
pub struct ScriptedMarginService {
    answers: HashMap<Decimal, Result<Option<Decimal>, MarginLookupError>>,
    queries: RwLock<Vec<MarginQuery>>,
}

impl ScriptedMarginService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, strike: Decimal, margin: Decimal) -> Self {
        self.answers.insert(strike, Ok(Some(margin)));
        self
    }

    pub fn fail(mut self, strike: Decimal, error: MarginLookupError) -> Self {
        self.answers.insert(strike, Err(error));
        self
    }

    pub fn queries(&self) -> Vec<MarginQuery> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl MarginServicePort for ScriptedMarginService {
    async fn margin_required(
        &self,
        query: &MarginQuery,
    ) -> Result<Option<Decimal>, MarginLookupError> {
        self.queries.write().unwrap().push(query.clone());
        self.answers
            .get(&query.strike_price)
            .cloned()
            .unwrap_or(Ok(None))
    }
}
