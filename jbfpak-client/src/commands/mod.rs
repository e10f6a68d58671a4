//! Command handlers for the jbfpak CLI.

pub mod extract;
pub mod info;
