//! Twofish driven as a byte-feedback stream cipher.
//!
//! ToPack never uses Twofish as a block cipher proper: for every input
//! byte it encrypts a 16-byte sliding window, XORs the first keystream
//! byte into the stream, then shifts the window left and appends the
//! *input* byte. During decryption the input is the ciphertext, so the
//! window tracks the ciphertext stream and the construction stays
//! self-synchronizing. Only the decrypt direction exists in packs; the
//! matching encrypt side lives in the test suites that build fixtures.

use cipher::{BlockEncrypt, KeyInit};
use twofish::Twofish;

use crate::keys::{DEFAULT_IV, PACK_KEY_LEN};
use crate::{CryptoError, Result, StreamDecrypt};

/// Width of the sliding feedback window (one Twofish block).
pub const WINDOW_LEN: usize = 16;

/// Stream cipher state: a keyed Twofish instance plus the feedback window.
///
/// Every module gets a fresh instance keyed from its directory entry;
/// header decoding re-keys one instance through [`reset`](Self::reset).
pub struct TwofishFeedback {
    cipher: Twofish,
    window: [u8; WINDOW_LEN],
}

impl TwofishFeedback {
    /// Create a cipher for `key` with the stock pack IV.
    pub fn new(key: &[u8; PACK_KEY_LEN]) -> Result<Self> {
        Self::with_iv(key, &DEFAULT_IV)
    }

    /// Create a cipher with an explicit IV.
    pub fn with_iv(key: &[u8; PACK_KEY_LEN], iv: &[u8; WINDOW_LEN]) -> Result<Self> {
        Ok(Self {
            cipher: init_twofish(key)?,
            window: *iv,
        })
    }

    /// Re-key and restart the stream from position zero with the stock IV.
    pub fn reset(&mut self, key: &[u8; PACK_KEY_LEN]) -> Result<()> {
        self.reset_with_iv(key, &DEFAULT_IV)
    }

    /// Re-key and restart the stream from position zero.
    pub fn reset_with_iv(&mut self, key: &[u8; PACK_KEY_LEN], iv: &[u8; WINDOW_LEN]) -> Result<()> {
        self.cipher = init_twofish(key)?;
        self.window = *iv;
        Ok(())
    }
}

/// Build the Twofish instance for an 8-byte pack key.
///
/// Pack keys are shorter than any key length Twofish defines; they are
/// zero-extended to 128 bits, the standard short-key rule.
fn init_twofish(key: &[u8; PACK_KEY_LEN]) -> Result<Twofish> {
    let mut padded = [0u8; 16];
    padded[..PACK_KEY_LEN].copy_from_slice(key);
    Twofish::new_from_slice(&padded)
        .map_err(|_| CryptoError::InitializationFailed("bad Twofish key length".to_string()))
}

impl StreamDecrypt for TwofishFeedback {
    fn decrypt_byte(&mut self, x: u8) -> u8 {
        let mut block = cipher::Block::<Twofish>::clone_from_slice(&self.window);
        self.cipher.encrypt_block(&mut block);
        // Feedback takes the input byte, not the recovered one.
        self.window.copy_within(1.., 0);
        self.window[WINDOW_LEN - 1] = x;
        x ^ block[0]
    }
}
