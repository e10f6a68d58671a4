//! Pack header decryption and the decoded header's accessors.
//!
//! The raw header is the first 0x588 bytes of the container and is peeled
//! in three passes: the LCG scramble over the whole block, a Twofish
//! feedback pass under the fixed header key, then a third Twofish pass
//! over the first 0x544 bytes keyed either with zeroes (unlocked packs)
//! or with a key folded out of the program the pack is locked to. Only
//! after the second pass is the lock-name region readable, which is what
//! makes the third pass conditional on external input.

use std::io::{Read, Seek, SeekFrom};

use tracing::debug;

use jbfpak_crypto::{HEADER_KEY, LcgCipher, StreamDecrypt, TwofishFeedback, derive_program_key};

use crate::directory::DirEntry;
use crate::text::{decode_ascii, printable_ascii};
use crate::{Error, HEADER_MAIN_LEN, HEADER_TOTAL_LEN, NUM_SLOTS, Result};

/// Offset of the description length byte.
const DESCRIPTION_LEN_OFFSET: usize = 0x441;
/// Offset of the description text.
const DESCRIPTION_OFFSET: usize = 0x442;
/// Offset of the lock program name length byte.
const LOCK_NAME_LEN_OFFSET: usize = 0x544;
/// Offset of the lock program name.
const LOCK_NAME_OFFSET: usize = 0x545;
/// Upper bound applied to the stored name length.
const LOCK_NAME_MAX_LEN: usize = 0x43;

/// A decoded pack header: the 0x544-byte slot table and description
/// region, plus the lock name recovered on the way.
pub struct PakHeader {
    data: Vec<u8>,
    lock_program: Option<String>,
}

impl PakHeader {
    /// Decrypt the header of `pack`.
    ///
    /// `program` is the binary the pack is locked to, when there is one.
    /// Locked packs fail with [`Error::PackLocked`] if it is absent; the
    /// error names the program so the caller can ask for it.
    pub fn decode<R, P>(pack: &mut R, program: Option<&mut P>) -> Result<Self>
    where
        R: Read + Seek,
        P: Read + Seek,
    {
        let eof = pack.seek(SeekFrom::End(0))?;
        if eof < HEADER_TOTAL_LEN as u64 {
            return Err(Error::TruncatedHeader {
                expected: HEADER_TOTAL_LEN,
                actual: eof,
            });
        }

        pack.seek(SeekFrom::Start(0))?;
        let mut header = vec![0u8; HEADER_TOTAL_LEN];
        pack.read_exact(&mut header)?;

        LcgCipher::new().decrypt(&mut header);
        let mut tf = TwofishFeedback::new(&HEADER_KEY)?;
        tf.decrypt(&mut header);

        let lock_len = usize::from(header[LOCK_NAME_LEN_OFFSET]).min(LOCK_NAME_MAX_LEN);
        let (lock_program, slot_key) = if lock_len == 0 {
            (None, [0u8; 8])
        } else {
            let name = printable_ascii(&header[LOCK_NAME_OFFSET..LOCK_NAME_OFFSET + lock_len]);
            debug!("pack is locked to {name:?}");
            let Some(program) = program else {
                return Err(Error::PackLocked { program: name });
            };
            let key = derive_program_key(program)?;
            (Some(name), key)
        };

        // The third pass always runs; unlocked packs just use the zero key.
        // It covers the slot table and description, not the lock region.
        tf.reset(&slot_key)?;
        tf.decrypt_prefix(&mut header, HEADER_MAIN_LEN)?;
        header.truncate(HEADER_MAIN_LEN);

        Ok(Self {
            data: header,
            lock_program,
        })
    }

    /// Free-text pack description; empty when absent or malformed.
    #[must_use]
    pub fn description(&self) -> String {
        let len = usize::from(self.data[DESCRIPTION_LEN_OFFSET]);
        let end = (DESCRIPTION_OFFSET + len).min(self.data.len());
        decode_ascii(&self.data[DESCRIPTION_OFFSET..end]).unwrap_or_default()
    }

    /// Name of the program this pack is locked to, if any.
    #[must_use]
    pub fn lock_program(&self) -> Option<&str> {
        self.lock_program.as_deref()
    }

    /// Parse the directory slot at `index`, valid or not.
    ///
    /// Returns `None` past the end of the table.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<DirEntry> {
        if index >= NUM_SLOTS {
            return None;
        }
        let start = index * DirEntry::LEN;
        let raw = self.data.get(start..start + DirEntry::LEN)?;
        Some(DirEntry::parse(index, raw.try_into().ok()?))
    }

    /// All valid directory entries, tagged with their original slot index.
    ///
    /// Gaps are skipped, never renumbered; `eof` is the container length
    /// the entries must fit inside.
    #[must_use]
    pub fn directory(&self, eof: u64) -> Vec<DirEntry> {
        (0..NUM_SLOTS)
            .filter_map(|index| self.slot(index))
            .filter(|entry| entry.is_valid(eof))
            .collect()
    }
}
