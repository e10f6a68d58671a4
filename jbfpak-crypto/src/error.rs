//! Error types for jbfpak-crypto operations.

use thiserror::Error;

/// Errors that can occur during cipher and key operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Cipher could not be constructed.
    #[error("cipher initialization failed: {0}")]
    InitializationFailed(String),

    /// A decrypt was asked to process more bytes than the buffer holds.
    #[error("decrypt length {requested} exceeds buffer length {available}")]
    LengthOutOfRange { requested: usize, available: usize },

    /// IO error while sampling an external program.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
