//! Cloud Firestore adapters.
//!
//! - [`value`] - typed-value codec shared with the CloudEvent decoder
//! - [`store`] - REST notification store

pub mod store;
pub mod value;

pub use store::FirestoreStore;
