//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for the chain source, margin service and notice sink
//! - **Use Cases**: Chain extraction, margin enrichment, and the scan pipeline

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
