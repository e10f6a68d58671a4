//! jbfpak client library
//!
//! Command handlers and output plumbing for the `jbfpak` binary.

pub mod commands;
pub mod output;

// Re-export command handlers
pub use crate::commands::{extract::handle as handle_extract, info::handle as handle_info};

/// Output format options for the CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// Pretty-printed JSON
    Json,
}
