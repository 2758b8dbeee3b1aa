//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`change`] - Builders for field maps and document changes.
//! - [`push`] - Recording and failing [`PushGateway`](crate::port::PushGateway) doubles.
//! - [`store`] - Failing [`NotificationStore`](crate::port::NotificationStore) double;
//!   use [`MemoryStore`](crate::adapter::outbound::memory::MemoryStore) for a working one.

pub mod change;
pub mod push;
pub mod store;
