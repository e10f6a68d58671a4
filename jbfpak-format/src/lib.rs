//! Parser and extractor for JBFMod pack (.pak) containers.
//!
//! Packs hold up to 64 tracker modules behind a doubly encrypted
//! directory header. This crate recovers the plaintext header, walks the
//! fixed slot table, decrypts each module with its per-entry key, and
//! sniffs the tracker format to name the output file.

pub mod directory;
pub mod error;
pub mod extract;
pub mod header;
pub mod sniff;
pub mod text;

pub use directory::DirEntry;
pub use error::Error;
pub use extract::{ExtractReport, ExtractedModule, extract_pack, output_filename, read_module};
pub use header::PakHeader;
pub use sniff::{ModuleFormat, ModuleInfo, sniff_module};

/// Number of directory slots in every pack.
pub const NUM_SLOTS: usize = 64;

/// Total encrypted header length.
pub const HEADER_TOTAL_LEN: usize = 0x588;

/// Length of the usable header: slot table plus description text.
pub const HEADER_MAIN_LEN: usize = 0x544;

/// Result type for pack operations.
pub type Result<T> = std::result::Result<T, Error>;
