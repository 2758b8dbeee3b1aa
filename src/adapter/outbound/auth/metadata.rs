//! Token source backed by the GCE / Cloud Run metadata server.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::port::TokenSource;

/// Default metadata server root.
pub const METADATA_URL: &str = "http://metadata.google.internal/";

const TOKEN_PATH: &str = "computeMetadata/v1/instance/service-accounts/default/token";

/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Fetches the default service account's token and caches it until shortly
/// before expiry.
pub struct MetadataTokenSource {
    client: Client,
    token_url: Url,
    cached: Mutex<Option<CachedToken>>,
}

impl MetadataTokenSource {
    /// Create a token source against the metadata server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token URL cannot be built from `base_url`.
    pub fn new(client: Client, base_url: &Url) -> Result<Self> {
        Ok(Self {
            client,
            token_url: base_url.join(TOKEN_PATH)?,
            cached: Mutex::new(None),
        })
    }

    fn cached_token(&self, now: DateTime<Utc>) -> Option<String> {
        self.cached
            .lock()
            .as_ref()
            .filter(|t| t.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > now)
            .map(|t| t.value.clone())
    }

    async fn fetch(&self) -> Result<CachedToken> {
        let response = self
            .client
            .get(self.token_url.clone())
            .header("Metadata-Flavor", "Google")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Auth(format!(
                "metadata server returned {status}"
            )));
        }

        let body: TokenResponse = response.json().await?;
        Ok(CachedToken {
            value: body.access_token,
            expires_at: Utc::now() + Duration::seconds(body.expires_in),
        })
    }
}

#[async_trait]
impl TokenSource for MetadataTokenSource {
    async fn token(&self) -> Result<String> {
        if let Some(token) = self.cached_token(Utc::now()) {
            return Ok(token);
        }

        // Concurrent misses may both fetch; the later one wins the cache.
        let fresh = self.fetch().await?;
        debug!(expires_at = %fresh.expires_at, "Fetched access token from metadata server");
        let value = fresh.value.clone();
        *self.cached.lock() = Some(fresh);
        Ok(value)
    }
}
