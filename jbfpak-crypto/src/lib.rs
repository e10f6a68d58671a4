//! Cipher primitives for JBFMod pack (.pak) decryption.
//!
//! This crate provides:
//! - The Borland-style LCG keystream that scrambles pack headers
//! - The Twofish byte-feedback stream cipher used for headers and modules
//! - Unlock-key derivation from the program a pack is locked to
//! - The hard-coded pack constants (header key, default IV, scramble seed)
//!
//! None of this is meant to be cryptographically sound; it is a bit-exact
//! reproduction of the legacy scheme ToPack bakes into its containers.

pub mod error;
pub mod keys;
pub mod lcg;
pub mod program_key;
pub mod twofish_stream;

pub use error::CryptoError;
pub use keys::{DEFAULT_IV, HEADER_KEY, PACK_KEY_LEN, SCRAMBLE_SEED};
pub use lcg::{Lcg, LcgCipher};
pub use program_key::derive_program_key;
pub use twofish_stream::TwofishFeedback;

/// Result type for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Byte-oriented decryption over mutable buffers.
///
/// Both pack ciphers advance internal state on every byte; resetting an
/// instance is the only way to restart a stream from position zero.
pub trait StreamDecrypt {
    /// Decrypt one byte, advancing the cipher state.
    fn decrypt_byte(&mut self, x: u8) -> u8;

    /// Decrypt `data` in place.
    fn decrypt(&mut self, data: &mut [u8]) {
        for b in data.iter_mut() {
            *b = self.decrypt_byte(*b);
        }
    }

    /// Decrypt the first `len` bytes of `data` in place, leaving the tail
    /// untouched.
    ///
    /// Asking for more bytes than the buffer holds is an error, not a
    /// truncated decrypt.
    fn decrypt_prefix(&mut self, data: &mut [u8], len: usize) -> Result<()> {
        let available = data.len();
        let head = data
            .get_mut(..len)
            .ok_or(CryptoError::LengthOutOfRange {
                requested: len,
                available,
            })?;
        self.decrypt(head);
        Ok(())
    }
}
