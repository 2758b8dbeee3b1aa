//! Inbound adapters (driving side): entry points that invoke the handler.

pub mod cli;
pub mod http;
