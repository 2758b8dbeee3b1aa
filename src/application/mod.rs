//! Application layer: the change-handling use case.

pub mod notifier;

pub use notifier::LowStockNotifier;
