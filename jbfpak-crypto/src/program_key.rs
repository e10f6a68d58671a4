//! Unlock-key derivation from the program a pack is locked to.
//!
//! Locked packs refuse to open unless the reader can reproduce an 8-byte
//! key folded out of the player executable itself: one block of up to
//! 8 bytes every 0x4000 bytes, XORed together. Sampling starts at offset
//! 1, not 0 — a quirk of the original scheme that changes every key.

use std::io::{Read, Seek, SeekFrom};

use tracing::debug;

use crate::keys::PACK_KEY_LEN;
use crate::Result;

/// Byte distance between sampled blocks.
const SAMPLE_STRIDE: u64 = 0x4000;

/// Offset of the first sampled block.
const SAMPLE_START: u64 = 1;

/// Derive the 8-byte unlock key from a program binary.
///
/// The fold is a plain XOR, so the result only depends on the set of
/// sampled blocks, not the order they are combined in. A short final
/// block is zero-extended; a program too small to reach the first sample
/// offset yields the all-zero key.
pub fn derive_program_key<R: Read + Seek>(program: &mut R) -> Result<[u8; PACK_KEY_LEN]> {
    let len = program.seek(SeekFrom::End(0))?;

    let mut key = [0u8; PACK_KEY_LEN];
    let mut offset = SAMPLE_START;
    while offset < len {
        program.seek(SeekFrom::Start(offset))?;
        let mut block = [0u8; PACK_KEY_LEN];
        let filled = read_up_to(program, &mut block)?;
        for (k, b) in key.iter_mut().zip(&block[..filled]) {
            *k ^= *b;
        }
        offset += SAMPLE_STRIDE;
    }

    debug!("derived unlock key {} from {len} program bytes", hex::encode(key));
    Ok(key)
}

/// Read up to `buf.len()` bytes, stopping early at EOF.
fn read_up_to<R: Read>(r: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = r.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
