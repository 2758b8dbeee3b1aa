//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (document database, push messaging, credentials).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!   CloudEvent ─────▶│   ChangeHandler         │
//!   replay file ────▶│   (LowStockNotifier)    │
//!                    └─────────────────────────┘
//!                         │              │
//!                         ▼              ▼
//!               ┌──────────────────┐ ┌─────────────┐
//!               │NotificationStore │ │ PushGateway │
//!               └──────────────────┘ └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ChangeHandler`] - Trigger entry point
//! - [`NotificationStore`] - Notification persistence
//! - [`PushGateway`] - Topic push messaging
//! - [`TokenSource`] - OAuth2 access tokens

pub mod inbound;
pub mod outbound;

pub use inbound::change::ChangeHandler;
pub use outbound::auth::TokenSource;
pub use outbound::push::PushGateway;
pub use outbound::store::NotificationStore;
