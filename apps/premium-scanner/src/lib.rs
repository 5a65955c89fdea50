// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::needless_collect,
        clippy::items_after_statements
    )
)]

//! Premium Scanner - Rust Core Library
//!
//! Builds a per-strike table of premium earned and margin required for
//! short-option strategies.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Value objects and pure chain logic
//!   - `shared`: `InstrumentName`, `OptionSide`, `DomainError`
//!   - `option_chain`: raw chain entries, `QuoteRecord`, `EnrichedRecord`,
//!     best-price selection
//!
//! - **Application**: Ports and use cases
//!   - `ports`: `ChainSourcePort`, `MarginServicePort`, `NoticePublisherPort`
//!   - `use_cases`: `ChainExtractor`, `MarginEnricher`, `ScanPremiumUseCase`
//!
//! - **Infrastructure**: Adapters
//!   - `broker`: broker REST adapter (chain + margin endpoints)
//!   - `config`: environment settings
//!   - `notice`: tracing and in-memory notice sinks
//!   - `presentation`: table and JSON rendering

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// Domain re-exports
pub use domain::option_chain::{EnrichedRecord, OptionChainEntry, QuoteRecord, RawOptionChain};
pub use domain::shared::{DomainError, InstrumentName, OptionSide};

// Application re-exports
pub use application::ports::{
    ChainSourcePort, FetchError, MarginLookupError, MarginQuery, MarginServicePort,
    NoOpNoticePublisher, NoticePublisherPort, PipelineNotice,
};
pub use application::use_cases::{
    ChainExtractor, MarginEnricher, ScanOutcome, ScanPremiumUseCase, ScanRequest,
};

// Infrastructure re-exports
pub use infrastructure::broker::http::{BrokerApiAdapter, BrokerApiError, BrokerHttpConfig};
pub use infrastructure::config::ScannerConfig;
pub use infrastructure::notice::{InMemoryNoticePublisher, TracingNoticePublisher};
