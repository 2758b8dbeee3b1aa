//! Inbound (driving) ports consumed by inbound adapters.
//!
//! Inbound ports expose application capabilities to external drivers such as:
//!
//! - the CloudEvent HTTP receiver
//! - the `replay` command
//!
//! # Modules
//!
//! - [`change`]: Document change handling

pub mod change;
