//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the notification
//! store, the push gateway, and the credentials both of them use.

pub mod auth;
pub mod push;
pub mod store;
