//! Outbound adapters (driven side): implementations of outbound ports.

pub mod auth;
pub mod fcm;
pub mod firestore;
pub mod log;
pub mod memory;
