//! Google Cloud project, endpoint, and credential settings.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::adapter::outbound::auth::METADATA_URL;
use crate::error::{ConfigError, Result};

/// How access tokens are obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Default service account via the metadata server.
    #[default]
    Metadata,
    /// Token from `GOOGLE_OAUTH_ACCESS_TOKEN`.
    Static,
}

/// Google Cloud settings shared by the Firestore and FCM adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Project hosting Firestore and FCM. `GOOGLE_CLOUD_PROJECT` fills it
    /// when empty.
    #[serde(default)]
    pub project_id: String,
    /// Firestore database id.
    #[serde(default = "default_database")]
    pub database: String,
    /// Firestore REST root (point at the emulator for local runs).
    #[serde(default = "default_firestore_url")]
    pub firestore_url: String,
    /// FCM REST root.
    #[serde(default = "default_messaging_url")]
    pub messaging_url: String,
    /// Metadata server root, used with [`AuthMode::Metadata`].
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,
    #[serde(default)]
    pub auth: AuthMode,
    /// Per-request timeout for outbound calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_database() -> String {
    "(default)".into()
}

fn default_firestore_url() -> String {
    "https://firestore.googleapis.com/".into()
}

fn default_messaging_url() -> String {
    "https://fcm.googleapis.com/".into()
}

fn default_metadata_url() -> String {
    METADATA_URL.into()
}

const fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_database(),
            firestore_url: default_firestore_url(),
            messaging_url: default_messaging_url(),
            metadata_url: default_metadata_url(),
            auth: AuthMode::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GoogleConfig {
    pub fn firestore_url(&self) -> Result<Url> {
        parse_root("firestore_url", &self.firestore_url)
    }

    pub fn messaging_url(&self) -> Result<Url> {
        parse_root("messaging_url", &self.messaging_url)
    }

    pub fn metadata_url(&self) -> Result<Url> {
        parse_root("metadata_url", &self.metadata_url)
    }

    /// Check every endpoint parses.
    pub(super) fn validate_urls(&self) -> Result<()> {
        self.firestore_url()?;
        self.messaging_url()?;
        self.metadata_url()?;
        Ok(())
    }
}

/// Parse a REST root, adding the trailing slash `Url::join` needs to keep
/// any path prefix.
fn parse_root(field: &'static str, raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| {
        ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }
        .into()
    })
}
