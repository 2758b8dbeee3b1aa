//! Terminal output helpers shared by CLI handlers.
//!
//! Styling is applied only when the target stream supports color, so piped
//! output stays plain text.

use std::fmt::Display;

use owo_colors::{OwoColorize, Stream};

/// Print a section header.
pub fn section(title: &str) {
    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
}

/// Print an aligned key/value line.
pub fn field(label: &str, value: impl Display) {
    println!(
        "  {:<14} {}",
        label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    println!(
        "  {} {}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green()),
        message
    );
}

/// Print a failure line to stderr.
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        "error:".if_supports_color(Stream::Stderr, |t| t.red()),
        message
    );
}
