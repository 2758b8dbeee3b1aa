//! Lowstock - low-stock crossing notifier for Firestore inventory documents.
//!
//! Watches update events on an inventory collection and, when a product's
//! stock falls from at-or-above its threshold to below it, writes one
//! idempotent notification document and broadcasts a best-effort push alert.
//!
//! # Architecture
//!
//! - **`domain`** - Quantity coercion, crossing evaluation, notification records
//! - **`port`** - Traits for the handler, notification store, push gateway, tokens
//! - **`application`** - [`LowStockNotifier`](application::LowStockNotifier), the
//!   store-then-push sequence
//! - **`adapter`** - CloudEvent HTTP receiver and CLI; Firestore, FCM,
//!   metadata-server, in-memory and log adapters
//! - **`infrastructure`** - Configuration loading and adapter wiring
//!
//! # Features
//!
//! - `testkit` - Expose test doubles to integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lowstock::adapter::outbound::log::LogPush;
//! use lowstock::adapter::outbound::memory::MemoryStore;
//! use lowstock::application::LowStockNotifier;
//! use lowstock::domain::{AlertRouting, DocumentChange};
//!
//! # async fn demo(change: DocumentChange) -> lowstock::error::Result<()> {
//! let notifier = LowStockNotifier::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(LogPush),
//!     AlertRouting::default(),
//! );
//! let outcome = notifier.process(&change).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
