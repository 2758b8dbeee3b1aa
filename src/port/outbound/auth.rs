//! Access-token port shared by the Google REST adapters.

use async_trait::async_trait;

use crate::error::Result;

/// Supplies OAuth2 bearer tokens.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a token valid for at least the next request.
    async fn token(&self) -> Result<String>;
}
