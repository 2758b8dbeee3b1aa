//! OAuth2 access-token sources for the Google REST adapters.

mod metadata;

pub use metadata::{MetadataTokenSource, METADATA_URL};

use async_trait::async_trait;

use crate::error::{ConfigError, Error, Result};
use crate::port::TokenSource;

/// Environment variable holding a pre-issued access token.
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Fixed bearer token, e.g. from `gcloud auth print-access-token` or the
/// emulator's `owner` token.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Create a token source from the `GOOGLE_OAUTH_ACCESS_TOKEN` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or empty.
    pub fn from_env() -> Result<Self> {
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim())),
            _ => Err(Error::Config(ConfigError::MissingField {
                field: ACCESS_TOKEN_ENV,
            })),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
