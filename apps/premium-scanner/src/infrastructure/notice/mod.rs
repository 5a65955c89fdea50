//! Notice Sinks
//!
//! `TracingNoticePublisher` routes notices to the log; `InMemoryNoticePublisher`
//! keeps them for inspection.

mod in_memory;
mod tracing_publisher;

pub use in_memory::InMemoryNoticePublisher;
pub use tracing_publisher::TracingNoticePublisher;
