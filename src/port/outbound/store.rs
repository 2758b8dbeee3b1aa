//! Persistence port for notification records.

use async_trait::async_trait;

use crate::domain::NotificationRecord;
use crate::error::Result;

/// Durable storage for notification records.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Store name for logging.
    fn name(&self) -> &'static str;

    /// Create or merge `record` at its `notif_id`, stamping `createdAt` with
    /// the store's own clock.
    ///
    /// Writing the same record twice leaves one document with the same field
    /// values.
    async fn upsert(&self, record: &NotificationRecord) -> Result<()>;
}
