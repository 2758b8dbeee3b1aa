//! Low-stock crossing notifier.
//!
//! Handles one inventory change: resolves the threshold, evaluates the
//! crossing, stores the notification, then attempts the push. The store write
//! always completes before the push is attempted, so the in-app feed holds the
//! alert even when the push fails.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::crossing::{evaluate, Verdict};
use crate::domain::{
    AlertRouting, DocumentChange, NotificationRecord, Outcome, PushMessage, PushOutcome,
};
use crate::error::Result;
use crate::port::{ChangeHandler, NotificationStore, PushGateway};

/// Stock-crossing notifier.
///
/// Holds no per-invocation state; safe to share across concurrent requests.
pub struct LowStockNotifier {
    store: Arc<dyn NotificationStore>,
    push: Arc<dyn PushGateway>,
    routing: AlertRouting,
}

impl LowStockNotifier {
    /// Create a notifier writing to `store` and pushing through `push`.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        push: Arc<dyn PushGateway>,
        routing: AlertRouting,
    ) -> Self {
        Self {
            store,
            push,
            routing,
        }
    }

    #[must_use]
    pub const fn routing(&self) -> &AlertRouting {
        &self.routing
    }

    /// Run the full handling sequence for one change.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the notification cannot be persisted.
    /// Skips and push failures are not errors.
    pub async fn process(&self, change: &DocumentChange) -> Result<Outcome> {
        let Some(after) = change.after() else {
            info!(
                product_id = %change.product_id,
                event_id = %change.event_id,
                "Skip: document deleted"
            );
            return Ok(Outcome::Deleted);
        };

        let before_stock = change.before().stock();
        let after_stock = after.stock();
        let threshold = after.stock_threshold();

        let (stock, threshold) = match evaluate(before_stock, after_stock, threshold) {
            Verdict::Crossed { stock, threshold } => (stock, threshold),
            Verdict::Skip(reason) => {
                info!(
                    product_id = %change.product_id,
                    event_id = %change.event_id,
                    before_stock = %before_stock,
                    after_stock = %after_stock,
                    threshold = %threshold,
                    reason = %reason,
                    "Skip: no low-stock alert"
                );
                return Ok(Outcome::skipped(reason));
            }
        };

        let record = NotificationRecord::low_stock(
            change.product_id.clone(),
            &change.event_id,
            after.display_name(&change.product_id),
            after.image_url(),
            stock,
            threshold,
        );

        self.store.upsert(&record).await?;
        info!(
            notif_id = %record.notif_id,
            store = self.store.name(),
            stock,
            threshold,
            "Low-stock notification stored"
        );

        let push = self.dispatch(&record).await;

        Ok(Outcome::Notified {
            notif_id: record.notif_id,
            push,
        })
    }

    /// Best-effort push; failures are logged and reported, never raised.
    async fn dispatch(&self, record: &NotificationRecord) -> PushOutcome {
        let message = PushMessage::for_record(record, &self.routing);
        match self.push.publish(&message).await {
            Ok(message_id) => {
                info!(
                    notif_id = %record.notif_id,
                    gateway = self.push.name(),
                    topic = %message.topic,
                    message_id = %message_id,
                    "Push sent"
                );
                PushOutcome::Sent { message_id }
            }
            Err(e) => {
                error!(
                    notif_id = %record.notif_id,
                    gateway = self.push.name(),
                    error = %e,
                    "Push failed to send"
                );
                PushOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl ChangeHandler for LowStockNotifier {
    async fn handle(&self, change: DocumentChange) -> Result<Outcome> {
        self.process(&change).await
    }
}
