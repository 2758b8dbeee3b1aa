//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured adapters from
//! application configuration. These factories handle dependency injection
//! and wiring.
//!
//! # Submodules
//!
//! - [`auth`] - Access token source construction
//! - [`notifier`] - Notification store, push gateway, and notifier construction

pub mod auth;
pub mod notifier;
