//! Platform-agnostic domain logic: coercion, crossing evaluation, records.

pub mod crossing;
pub mod id;
pub mod inventory;
pub mod notification;
pub mod outcome;
pub mod quantity;

pub use crossing::{evaluate, Verdict};
pub use id::{EventId, NotificationId, ProductId};
pub use inventory::{DocumentChange, Fields, InventorySnapshot};
pub use notification::{AlertRouting, AndroidHints, NotificationRecord, PushMessage};
pub use outcome::{Outcome, PushOutcome, SkipReason};
pub use quantity::Quantity;
