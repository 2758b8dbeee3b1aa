//! Notification store doubles.

use async_trait::async_trait;

use crate::domain::NotificationRecord;
use crate::error::{Error, Result};
use crate::port::NotificationStore;

pub use crate::adapter::outbound::memory::MemoryStore;

/// Store whose every write fails.
pub struct FailingStore;

#[async_trait]
impl NotificationStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn upsert(&self, _record: &NotificationRecord) -> Result<()> {
        Err(Error::Store("write rejected".into()))
    }
}
