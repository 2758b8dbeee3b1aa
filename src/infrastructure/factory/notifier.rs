//! Notifier factory.
//!
//! Wires the notification store and push gateway selected by configuration
//! into a [`LowStockNotifier`]. Dry-run mode swaps both for local stand-ins so
//! no Google endpoint is touched.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::info;

use super::auth::build_token_source;
use crate::adapter::outbound::fcm::FcmGateway;
use crate::adapter::outbound::firestore::FirestoreStore;
use crate::adapter::outbound::log::LogPush;
use crate::adapter::outbound::memory::MemoryStore;
use crate::application::LowStockNotifier;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{NotificationStore, PushGateway};

/// Build the shared HTTP client for outbound Google calls.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(config: &Config) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.google.request_timeout_secs))
        .build()?;
    Ok(client)
}

/// Build the store and push gateway pair for `config`.
///
/// # Errors
///
/// Returns an error if an endpoint URL is invalid or credentials cannot be
/// set up.
pub fn build_outputs(
    config: &Config,
) -> Result<(Arc<dyn NotificationStore>, Arc<dyn PushGateway>)> {
    if config.dry_run {
        info!("Dry-run mode: in-memory store, logged pushes");
        let store: Arc<dyn NotificationStore> = Arc::new(MemoryStore::new());
        let push: Arc<dyn PushGateway> = Arc::new(LogPush);
        return Ok((store, push));
    }

    let google = &config.google;
    let client = build_http_client(config)?;
    let tokens = build_token_source(google, &client)?;

    let store = FirestoreStore::new(
        client.clone(),
        &google.firestore_url()?,
        &google.project_id,
        &google.database,
        config.notifier.notification_collection.clone(),
        Arc::clone(&tokens),
    )?;
    let push = FcmGateway::new(client, &google.messaging_url()?, &google.project_id, tokens)?;

    info!(
        project_id = %google.project_id,
        database = %google.database,
        collection = %config.notifier.notification_collection,
        topic = %config.notifier.topic,
        "Firestore store and FCM gateway configured"
    );

    let store: Arc<dyn NotificationStore> = Arc::new(store);
    let push: Arc<dyn PushGateway> = Arc::new(push);
    Ok((store, push))
}

/// Build the low-stock notifier from configuration.
///
/// # Errors
///
/// Returns an error if the outputs cannot be built.
pub fn build_notifier(config: &Config) -> Result<LowStockNotifier> {
    let (store, push) = build_outputs(config)?;
    Ok(LowStockNotifier::new(store, push, config.notifier.routing()))
}
