//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `broker/`: Broker REST adapter (option chain + margin calculator)
//!   - `notice/`: Notice sinks (tracing, in-memory)
//!
//! - **Driver Support (Inbound)**: What the binary needs to run a scan
//!   - `config/`: Environment configuration
//!   - `presentation/`: Table and JSON rendering of scan results

pub mod broker;
pub mod config;
pub mod notice;
pub mod presentation;
