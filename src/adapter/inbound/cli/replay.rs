//! Handler for the `replay` command.
//!
//! Feeds one recorded change through the same handler the receiver uses and
//! prints the resulting outcome as JSON.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::adapter::inbound::cli::command::ReplayArgs;
use crate::domain::{DocumentChange, EventId, Outcome};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::notifier::build_notifier;
use crate::port::ChangeHandler;

const EVENT_ID_FIELD: &str = "eventId";

/// Execute the replay command.
pub async fn execute(config: &Config, args: &ReplayArgs) -> Result<()> {
    let change = read_change(&args.file)?;
    info!(
        product_id = %change.product_id,
        event_id = %change.event_id,
        dry_run = config.dry_run,
        "Replaying change"
    );

    let notifier = build_notifier(config)?;
    let outcome = run(&notifier, change).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Read a change event from a JSON file.
///
/// A file without `eventId` gets one derived from its bytes, so replaying
/// the same file twice writes one notification.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a change.
pub fn read_change(path: &Path) -> Result<DocumentChange> {
    let content = std::fs::read(path)?;
    let mut value: Value = serde_json::from_slice(&content)?;
    if let Value::Object(fields) = &mut value {
        if !fields.contains_key(EVENT_ID_FIELD) {
            let derived = EventId::derive(&content);
            fields.insert(EVENT_ID_FIELD.into(), Value::String(derived.as_str().into()));
        }
    }
    Ok(serde_json::from_value(value)?)
}

async fn run(handler: &dyn ChangeHandler, change: DocumentChange) -> Result<Outcome> {
    handler.handle(change).await
}
