//! Trigger-facing port: handle one document change.

use async_trait::async_trait;

use crate::domain::{DocumentChange, Outcome};
use crate::error::Result;

/// Handles change events delivered by the hosting platform.
///
/// Invocations are independent; implementations keep no per-event state.
/// An `Err` means the event should be redelivered.
#[async_trait]
pub trait ChangeHandler: Send + Sync {
    /// Handle a single change event.
    async fn handle(&self, change: DocumentChange) -> Result<Outcome>;
}
