//! Invocation outcomes reported back to inbound adapters.

use std::fmt;

use serde::Serialize;

use super::id::NotificationId;

/// Why an invocation ended without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `stockThreshold` missing or not a finite number.
    InvalidThreshold,
    /// Current `stock` missing or not a finite number.
    UnknownStock,
    /// Stock did not cross below the threshold.
    NoCrossing,
    /// Event concerns a collection this handler does not watch.
    ForeignCollection,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidThreshold => "invalid_threshold",
            Self::UnknownStock => "unknown_stock",
            Self::NoCrossing => "no_crossing",
            Self::ForeignCollection => "foreign_collection",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the best-effort push step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PushOutcome {
    /// Gateway accepted the message.
    Sent {
        /// Gateway-assigned message name.
        message_id: String,
    },
    /// Gateway call failed; the stored record stands alone.
    Failed {
        /// Error text, as logged.
        reason: String,
    },
}

impl PushOutcome {
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Outcome of handling one change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The document was deleted; nothing to evaluate.
    Deleted,
    /// No alert warranted.
    Skipped {
        /// Why.
        reason: SkipReason,
    },
    /// Notification stored, push attempted.
    Notified {
        /// Stored record key.
        notif_id: NotificationId,
        /// Push attempt result.
        push: PushOutcome,
    },
}

impl Outcome {
    #[must_use]
    pub const fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }

    #[must_use]
    pub const fn is_notified(&self) -> bool {
        matches!(self, Self::Notified { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::{EventId, ProductId};

    #[test]
    fn outcomes_serialize_with_tag() {
        let skipped = serde_json::to_value(Outcome::skipped(SkipReason::NoCrossing)).unwrap();
        assert_eq!(skipped["outcome"], "skipped");
        assert_eq!(skipped["reason"], "no_crossing");

        let notified = serde_json::to_value(Outcome::Notified {
            notif_id: NotificationId::compose(&ProductId::new("p1"), &EventId::new("e1")),
            push: PushOutcome::Failed {
                reason: "timeout".into(),
            },
        })
        .unwrap();
        assert_eq!(notified["outcome"], "notified");
        assert_eq!(notified["notif_id"], "p1_e1");
        assert_eq!(notified["push"]["status"], "failed");
    }
}
