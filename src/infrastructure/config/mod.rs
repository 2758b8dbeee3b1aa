//! Infrastructure configuration modules.

pub mod google;
pub mod logging;
pub mod notifier;
pub mod server;
pub mod settings;
