//! Access token source factory.

use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use crate::adapter::outbound::auth::{MetadataTokenSource, StaticTokenSource};
use crate::error::Result;
use crate::infrastructure::config::google::{AuthMode, GoogleConfig};
use crate::port::TokenSource;

/// Build the token source selected by `google.auth`.
///
/// # Errors
///
/// Returns an error if the metadata URL is invalid, or if static mode is
/// selected and the token variable is not set.
pub fn build_token_source(google: &GoogleConfig, client: &Client) -> Result<Arc<dyn TokenSource>> {
    match google.auth {
        AuthMode::Metadata => {
            let url = google.metadata_url()?;
            info!(metadata_url = %url, "Using metadata server credentials");
            Ok(Arc::new(MetadataTokenSource::new(client.clone(), &url)?))
        }
        AuthMode::Static => {
            info!("Using static access token");
            Ok(Arc::new(StaticTokenSource::from_env()?))
        }
    }
}
