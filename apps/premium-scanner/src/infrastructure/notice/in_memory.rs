//! In-memory notice sink.

use std::sync::RwLock;

use crate::application::ports::{NoticeLevel, NoticePublisherPort, PipelineNotice};

/// Notice publisher that records every notice it receives.
#[derive(Debug, Default)]
pub struct InMemoryNoticePublisher {
    notices: RwLock<Vec<PipelineNotice>>,
}

impl InMemoryNoticePublisher {
    /// Create an empty publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notices, in publish order.
    #[must_use]
    pub fn notices(&self) -> Vec<PipelineNotice> {
        self.notices
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of notices at `level` or above.
    #[must_use]
    pub fn count_at_least(&self, level: NoticeLevel) -> usize {
        self.notices
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .filter(|n| n.level() >= level)
            .count()
    }
}

impl NoticePublisherPort for InMemoryNoticePublisher {
    fn publish(&self, notice: PipelineNotice) {
        let mut notices = self
            .notices
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        notices.push(notice);
        drop(notices);
    }
}
