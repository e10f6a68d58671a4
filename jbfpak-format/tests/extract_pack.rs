//! End-to-end extraction against synthetically built containers.
//!
//! The builder below is the inverse of the decode pipeline: the LCG
//! scramble is a pure XOR keystream and therefore its own inverse, and
//! the Twofish feedback scheme encrypts by absorbing the ciphertext byte
//! into the window — the same byte the decrypt side sees as its input.
//! Layers are applied in reverse decode order (third pass first, LCG
//! last), so decoding peels them back exactly.

use std::io::Cursor;

use cipher::{BlockEncrypt, KeyInit};
use pretty_assertions::assert_eq;
use twofish::Twofish;

use jbfpak_crypto::{DEFAULT_IV, HEADER_KEY, LcgCipher, StreamDecrypt, derive_program_key};
use jbfpak_format::{
    Error, HEADER_MAIN_LEN, HEADER_TOTAL_LEN, PakHeader, extract_pack,
};

/// Encrypt-side Twofish feedback: window absorbs the output byte.
fn feedback_encrypt(key8: &[u8; 8], data: &mut [u8]) {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(key8);
    let cipher = Twofish::new_from_slice(&key).unwrap();

    let mut window = DEFAULT_IV;
    for b in data.iter_mut() {
        let mut block = cipher::Block::<Twofish>::clone_from_slice(&window);
        cipher.encrypt_block(&mut block);
        let c = *b ^ block[0];
        window.copy_within(1.., 0);
        window[15] = c;
        *b = c;
    }
}

struct SlotSpec {
    index: usize,
    key: [u8; 8],
    plaintext: Vec<u8>,
}

/// Build a pack around `slots`, encrypting the header with `slot_key` for
/// the third layer (all zeroes for unlocked packs).
fn build_pack(
    description: &str,
    lock_name: Option<&str>,
    slot_key: [u8; 8],
    slots: &[SlotSpec],
) -> Vec<u8> {
    let mut header = vec![0u8; HEADER_TOTAL_LEN];

    header[0x441] = u8::try_from(description.len()).unwrap();
    header[0x442..0x442 + description.len()].copy_from_slice(description.as_bytes());

    if let Some(name) = lock_name {
        header[0x544] = u8::try_from(name.len()).unwrap();
        header[0x545..0x545 + name.len()].copy_from_slice(name.as_bytes());
    }

    let mut payload = Vec::new();
    let mut offset = u32::try_from(HEADER_TOTAL_LEN).unwrap();
    for slot in slots {
        let start = 16 * slot.index;
        header[start..start + 8].copy_from_slice(&slot.key);
        header[start + 8..start + 12].copy_from_slice(&offset.to_le_bytes());
        let size = u32::try_from(slot.plaintext.len()).unwrap();
        header[start + 12..start + 16].copy_from_slice(&size.to_le_bytes());

        let mut encrypted = slot.plaintext.clone();
        feedback_encrypt(&slot.key, &mut encrypted);
        payload.extend_from_slice(&encrypted);
        offset += size;
    }

    // Inverse decode order: third pass, fixed header key pass, scramble.
    feedback_encrypt(&slot_key, &mut header[..HEADER_MAIN_LEN]);
    feedback_encrypt(&HEADER_KEY, &mut header);
    LcgCipher::new().decrypt(&mut header);

    header.extend_from_slice(&payload);
    header
}

fn protracker_module(title: &[u8]) -> Vec<u8> {
    let mut data = vec![0x11u8; 1200];
    data[..20].fill(0);
    data[..title.len()].copy_from_slice(title);
    data[1080..1084].copy_from_slice(b"M.K.");
    data
}

fn screamtracker_module(title: &[u8]) -> Vec<u8> {
    let mut data = vec![0x22u8; 96];
    data[..28].fill(0);
    data[..title.len()].copy_from_slice(title);
    data[28] = 0x1A;
    data
}

fn no_program() -> Option<&'static mut Cursor<Vec<u8>>> {
    None
}

#[test]
fn test_extract_unlocked_pack() {
    let _ = tracing_subscriber::fmt::try_init();

    let slots = vec![
        SlotSpec {
            index: 0,
            key: *b"firstkey",
            plaintext: protracker_module(b"monday jam"),
        },
        SlotSpec {
            index: 5,
            key: [0xC3; 8],
            plaintext: screamtracker_module(b"axel f"),
        },
        SlotSpec {
            index: 63,
            key: [0x5A; 8],
            plaintext: vec![0xF7u8; 300],
        },
    ];
    let pack = build_pack("demo keygen music", None, [0u8; 8], &slots);

    let dir = tempfile::tempdir().unwrap();
    let report = extract_pack(&mut Cursor::new(&pack), dir.path(), no_program()).unwrap();

    assert_eq!(report.description, "demo keygen music");
    assert_eq!(report.lock_program, None);

    let names: Vec<&str> = report.modules.iter().map(|m| m.filename.as_str()).collect();
    assert_eq!(names, ["0 monday jam.mod", "5 axel f.s3m", "63.bin"]);

    for (slot, module) in slots.iter().zip(&report.modules) {
        assert_eq!(module.index, slot.index);
        let written = std::fs::read(dir.path().join(&module.filename)).unwrap();
        assert_eq!(written, slot.plaintext);
    }
}

#[test]
fn test_locked_pack_without_program_fails() {
    let program: Vec<u8> = (0..0x9000u32).map(|i| (i % 257) as u8).collect();
    let slot_key = derive_program_key(&mut Cursor::new(&program)).unwrap();

    let slots = vec![SlotSpec {
        index: 2,
        key: [0x77; 8],
        plaintext: screamtracker_module(b"locked away"),
    }];
    let pack = build_pack("", Some("PLAYER.EXE"), slot_key, &slots);

    let dir = tempfile::tempdir().unwrap();
    let err = extract_pack(&mut Cursor::new(&pack), dir.path(), no_program()).unwrap_err();

    match err {
        Error::PackLocked { program } => assert_eq!(program, "PLAYER.EXE"),
        other => panic!("unexpected error: {other:?}"),
    }

    // Nothing was extracted.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_locked_pack_round_trips_with_program() {
    let program: Vec<u8> = (0..0x9000u32).map(|i| (i % 257) as u8).collect();
    let slot_key = derive_program_key(&mut Cursor::new(&program)).unwrap();

    let plaintext = screamtracker_module(b"locked away");
    let slots = vec![SlotSpec {
        index: 2,
        key: [0x77; 8],
        plaintext: plaintext.clone(),
    }];
    let pack = build_pack("", Some("PLAYER.EXE"), slot_key, &slots);

    let dir = tempfile::tempdir().unwrap();
    let mut program_reader = Cursor::new(program);
    let report =
        extract_pack(&mut Cursor::new(&pack), dir.path(), Some(&mut program_reader)).unwrap();

    assert_eq!(report.lock_program.as_deref(), Some("PLAYER.EXE"));
    assert_eq!(report.modules.len(), 1);
    assert_eq!(report.modules[0].filename, "2 locked away.s3m");

    let written = std::fs::read(dir.path().join("2 locked away.s3m")).unwrap();
    assert_eq!(written, plaintext);
}

#[test]
fn test_entry_past_eof_is_skipped() {
    let slots = vec![
        SlotSpec {
            index: 1,
            key: [0x21; 8],
            plaintext: vec![0xABu8; 200],
        },
        SlotSpec {
            index: 9,
            key: [0x84; 8],
            plaintext: vec![0xCDu8; 100],
        },
    ];
    let mut pack = build_pack("", None, [0u8; 8], &slots);
    // Cut into the last module so its slot no longer fits the file.
    pack.truncate(pack.len() - 1);

    let dir = tempfile::tempdir().unwrap();
    let report = extract_pack(&mut Cursor::new(&pack), dir.path(), no_program()).unwrap();

    assert_eq!(report.modules.len(), 1);
    assert_eq!(report.modules[0].index, 1);
}

#[test]
fn test_truncated_container_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = extract_pack(&mut Cursor::new(vec![0u8; 100]), dir.path(), no_program()).unwrap_err();

    assert!(matches!(
        err,
        Error::TruncatedHeader {
            expected: HEADER_TOTAL_LEN,
            actual: 100,
        }
    ));
}

#[test]
fn test_header_decode_exposes_description_and_slots() {
    let slots = vec![SlotSpec {
        index: 4,
        key: [0x66; 8],
        plaintext: vec![0u8; 64],
    }];
    let pack = build_pack("two lines\x1f of text  ", None, [0u8; 8], &slots);

    let mut cursor = Cursor::new(&pack);
    let header = PakHeader::decode(&mut cursor, no_program()).unwrap();

    // Control bytes stripped, whitespace trimmed.
    assert_eq!(header.description(), "two lines of text");
    assert_eq!(header.lock_program(), None);

    let eof = pack.len() as u64;
    let entries = header.directory(eof);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].index, 4);
    assert_eq!(entries[0].key, [0x66; 8]);
    assert_eq!(entries[0].offset, HEADER_TOTAL_LEN as u32);
    assert_eq!(entries[0].size, 64);
}
