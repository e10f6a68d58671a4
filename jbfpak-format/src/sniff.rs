//! Tracker module format detection.
//!
//! Decrypted modules carry no metadata of their own, so the extractor
//! sniffs the four formats jbfmod can play by their fixed-offset
//! signatures. Detection is naive by design; stripped XM headers, for
//! one, will fall through to the `bin` fallback.

use tracing::trace;

use crate::text::decode_ascii;

/// Signatures accepted at offset 1080 of a ProTracker module.
const PROTRACKER_MAGICS: [&str; 6] = ["M.K.", "M!K!", "FLT4", "FLT8", "6CHN", "8CHN"];

/// Tracker formats recognized by the sniffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    /// ProTracker and compatible (`.mod`).
    ProTracker,
    /// ScreamTracker 3 (`.s3m`).
    ScreamTracker,
    /// FastTracker 2 extended module (`.xm`).
    FastTracker,
    /// Impulse Tracker (`.it`).
    ImpulseTracker,
    /// Nothing matched; extracted as raw bytes.
    Unknown,
}

impl ModuleFormat {
    /// File extension for extracted modules of this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::ProTracker => "mod",
            Self::ScreamTracker => "s3m",
            Self::FastTracker => "xm",
            Self::ImpulseTracker => "it",
            Self::Unknown => "bin",
        }
    }
}

impl std::fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Sniffer result: recovered title and detected format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Song title from the module header; may be empty.
    pub title: String,
    /// Detected tracker format.
    pub format: ModuleFormat,
}

/// Detect the format of a decrypted module and recover its title.
///
/// Detectors run in a fixed order and the first match wins; a module
/// matching none of them comes back untitled with
/// [`ModuleFormat::Unknown`]. The buffer is never modified.
#[must_use]
pub fn sniff_module(data: &[u8]) -> ModuleInfo {
    const DETECTORS: [(fn(&[u8]) -> Option<String>, ModuleFormat); 4] = [
        (detect_protracker, ModuleFormat::ProTracker),
        (detect_screamtracker, ModuleFormat::ScreamTracker),
        (detect_fasttracker, ModuleFormat::FastTracker),
        (detect_impulsetracker, ModuleFormat::ImpulseTracker),
    ];

    for (detect, format) in DETECTORS {
        if let Some(title) = detect(data) {
            trace!("module sniffed as {format}, title {title:?}");
            return ModuleInfo { title, format };
        }
    }

    ModuleInfo {
        title: String::new(),
        format: ModuleFormat::Unknown,
    }
}

/// ProTracker: four magic bytes at 1080 name the channel layout.
fn detect_protracker(data: &[u8]) -> Option<String> {
    let magic = decode_ascii(data.get(1080..1084)?)?;
    if !PROTRACKER_MAGICS.contains(&magic.as_str()) {
        return None;
    }
    decode_ascii(data.get(..20)?)
}

/// ScreamTracker 3: a lone 0x1A marker byte after the 28-byte song name.
fn detect_screamtracker(data: &[u8]) -> Option<String> {
    if *data.get(28)? != 0x1A {
        return None;
    }
    decode_ascii(data.get(..28)?)
}

/// FastTracker 2: a fixed plaintext banner, compared case-insensitively.
fn detect_fasttracker(data: &[u8]) -> Option<String> {
    let banner = decode_ascii(data.get(..16)?)?;
    if !banner.eq_ignore_ascii_case("extended module:") {
        return None;
    }
    decode_ascii(data.get(17..37)?)
}

/// Impulse Tracker: "IMPM" at the start of the file.
fn detect_impulsetracker(data: &[u8]) -> Option<String> {
    if decode_ascii(data.get(..4)?)? != "IMPM" {
        return None;
    }
    decode_ascii(data.get(4..30)?)
}
