//! The fixed 64-slot directory table.

use byteorder::{ByteOrder, LittleEndian};

/// One directory slot: where a module lives and the key that decrypts it.
///
/// Slots are positional; the index doubles as extraction order and output
/// filename prefix. The table is derived fresh from the header on every
/// run, so entries are plain copies with no aliasing to worry about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    /// Slot position within the table.
    pub index: usize,
    /// Per-module cipher key, used raw.
    pub key: [u8; 8],
    /// Byte offset of the encrypted module within the pack.
    pub offset: u32,
    /// Encrypted module length in bytes.
    pub size: u32,
}

impl DirEntry {
    /// On-disk slot length.
    pub const LEN: usize = 16;

    /// Parse a 16-byte slot: 8 key bytes, then offset and size, both
    /// little-endian.
    #[must_use]
    pub fn parse(index: usize, raw: &[u8; Self::LEN]) -> Self {
        let mut key = [0u8; 8];
        key.copy_from_slice(&raw[..8]);
        Self {
            index,
            key,
            offset: LittleEndian::read_u32(&raw[8..12]),
            size: LittleEndian::read_u32(&raw[12..16]),
        }
    }

    /// Whether this slot holds a module that fits in a pack of `eof` bytes.
    ///
    /// Empty slots carry a zero size; stale slots may point past the end
    /// of the file. Both are skipped without renumbering the survivors.
    #[must_use]
    pub fn is_valid(&self, eof: u64) -> bool {
        self.size != 0 && u64::from(self.offset) + u64::from(self.size) <= eof
    }
}
