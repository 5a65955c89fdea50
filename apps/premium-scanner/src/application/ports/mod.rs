//! Application Ports (Driven)
//!
//! Ports define how the application uses external systems:
//! the broker's option chain endpoint, its margin calculator, and the
//! notice side channel that reports recovered failures.

mod chain_source_port;
mod margin_service_port;
mod notice_publisher_port;

pub use chain_source_port::{ChainSourcePort, FetchError};
pub use margin_service_port::{MarginLookupError, MarginQuery, MarginServicePort};
pub use notice_publisher_port::{
    NoOpNoticePublisher, NoticeLevel, NoticePublisherPort, PipelineNotice,
};
