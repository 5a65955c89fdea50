//! Broker Adapters
//!
//! REST adapter for the broker's option chain and margin calculator endpoints.

pub mod http;
