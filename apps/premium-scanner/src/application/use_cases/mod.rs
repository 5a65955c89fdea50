//! Application Use Cases
//!
//! - `ChainExtractor`: fetch a chain and reduce it to best prices per strike
//! - `MarginEnricher`: attach margin and premium to each record
//! - `ScanPremiumUseCase`: run both stages, stopping early when there is no data

mod enrich_margin;
mod extract_chain;
mod scan_premium;

pub use enrich_margin::MarginEnricher;
pub use extract_chain::ChainExtractor;
pub use scan_premium::{ScanOutcome, ScanPremiumUseCase, ScanRequest};

#[cfg(test)]
pub(crate) mod fakes;
