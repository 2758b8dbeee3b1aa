//! Push messaging port.

use async_trait::async_trait;

use crate::domain::PushMessage;
use crate::error::Result;

/// Topic push gateway.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Gateway name for logging.
    fn name(&self) -> &'static str;

    /// Publish `message` to its topic, returning the gateway's message id.
    async fn publish(&self, message: &PushMessage) -> Result<String>;
}
