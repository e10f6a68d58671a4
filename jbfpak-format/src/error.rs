//! Error types for pack parsing and extraction.

use thiserror::Error;

/// Pack error types.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cipher error from jbfpak-crypto.
    #[error(transparent)]
    Crypto(#[from] jbfpak_crypto::CryptoError),

    /// The container is too short to hold an encrypted header.
    #[error("truncated header: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: u64 },

    /// The pack is locked to a program that was not supplied.
    #[error("pack is locked to \"{program}\"; run again with --program <path to {program}>")]
    PackLocked { program: String },
}
