//! Push gateway that only logs, for dry runs.

use async_trait::async_trait;
use tracing::info;

use crate::domain::PushMessage;
use crate::error::Result;
use crate::port::PushGateway;

/// A logging push gateway that records messages via tracing.
pub struct LogPush;

#[async_trait]
impl PushGateway for LogPush {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn publish(&self, message: &PushMessage) -> Result<String> {
        info!(
            topic = %message.topic,
            title = %message.title,
            body = %message.body,
            data = ?message.data,
            "Push (dry run)"
        );
        Ok(format!("dry-run/{}", message.topic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlertRouting, EventId, NotificationRecord, ProductId};

    #[tokio::test]
    async fn log_push_always_succeeds() {
        let record = NotificationRecord::low_stock(
            ProductId::new("p"),
            &EventId::new("e"),
            "Name".into(),
            String::new(),
            1.0,
            2.0,
        );
        let message = PushMessage::for_record(&record, &AlertRouting::default());
        let id = LogPush.publish(&message).await.unwrap();
        assert_eq!(id, "dry-run/lowStockTopic");
    }
}
