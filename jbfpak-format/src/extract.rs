//! Pack extraction: the slot walk, per-module decryption and output
//! naming behind the public `extract_pack` operation.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, info};

use jbfpak_crypto::{StreamDecrypt, TwofishFeedback};

use crate::directory::DirEntry;
use crate::header::PakHeader;
use crate::sniff::{ModuleFormat, ModuleInfo, sniff_module};
use crate::text::sanitize_title;
use crate::{NUM_SLOTS, Result};

/// One module recovered from a pack.
#[derive(Debug, Clone)]
pub struct ExtractedModule {
    /// Slot index within the pack (0-63).
    pub index: usize,
    /// Filename the module was written to, relative to the destination.
    pub filename: String,
    /// Title recovered by the sniffer; may be empty.
    pub title: String,
    /// Detected tracker format.
    pub format: ModuleFormat,
    /// Module length in bytes.
    pub size: u32,
}

/// Outcome of a whole-pack extraction.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// Free-text pack description, empty when absent.
    pub description: String,
    /// Program the pack was locked to, if any.
    pub lock_program: Option<String>,
    /// Extracted modules in ascending slot order.
    pub modules: Vec<ExtractedModule>,
}

/// Extract every valid module of `pack` into `destination`.
///
/// The destination directory must already exist; callers own directory
/// creation, console output and everything else around the pipeline. The
/// optional `program` is required for locked packs and ignored otherwise.
/// Any IO failure aborts the whole run; a locked pack without its program
/// fails before a single entry is touched.
pub fn extract_pack<R, P>(
    pack: &mut R,
    destination: &Path,
    program: Option<&mut P>,
) -> Result<ExtractReport>
where
    R: Read + Seek,
    P: Read + Seek,
{
    let eof = pack.seek(SeekFrom::End(0))?;
    let header = PakHeader::decode(pack, program)?;

    let entries = header.directory(eof);
    info!("pack holds {} of {NUM_SLOTS} slots", entries.len());

    let mut modules = Vec::with_capacity(entries.len());
    for entry in &entries {
        let buffer = read_module(pack, entry)?;
        let sniffed = sniff_module(&buffer);
        let filename = output_filename(entry.index, &sniffed);
        fs::write(destination.join(&filename), &buffer)?;
        debug!(
            "slot {}: wrote {filename} ({} bytes, {})",
            entry.index, entry.size, sniffed.format
        );
        modules.push(ExtractedModule {
            index: entry.index,
            filename,
            title: sniffed.title,
            format: sniffed.format,
            size: entry.size,
        });
    }

    Ok(ExtractReport {
        description: header.description(),
        lock_program: header.lock_program().map(str::to_owned),
        modules,
    })
}

/// Read and decrypt the module behind one directory entry.
///
/// Every entry gets a fresh cipher keyed from its slot. Module payloads
/// see only the Twofish layer; the LCG scramble is header-only.
pub fn read_module<R: Read + Seek>(pack: &mut R, entry: &DirEntry) -> Result<Vec<u8>> {
    pack.seek(SeekFrom::Start(entry.offset.into()))?;
    let mut buffer = vec![0u8; entry.size as usize];
    pack.read_exact(&mut buffer)?;

    let mut cipher = TwofishFeedback::new(&entry.key)?;
    cipher.decrypt(&mut buffer);
    Ok(buffer)
}

/// Assemble the output filename for a sniffed module.
///
/// The slot index always leads. The sanitized title follows when
/// anything of it survives, and the format extension is appended last.
#[must_use]
pub fn output_filename(index: usize, sniffed: &ModuleInfo) -> String {
    let title = sanitize_title(&sniffed.title);
    let stem = if title.is_empty() {
        index.to_string()
    } else {
        format!("{index} {title}")
    };

    let extension = sniffed.format.extension();
    if extension.is_empty() {
        stem
    } else {
        format!("{stem}.{extension}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_filename_with_title() {
        let sniffed = ModuleInfo {
            title: "A/B*C".to_string(),
            format: ModuleFormat::ProTracker,
        };
        assert_eq!(output_filename(3, &sniffed), "3 ABC.mod");
    }

    #[test]
    fn test_output_filename_without_title() {
        let sniffed = ModuleInfo {
            title: String::new(),
            format: ModuleFormat::Unknown,
        };
        assert_eq!(output_filename(7, &sniffed), "7.bin");
    }

    #[test]
    fn test_output_filename_title_sanitized_away() {
        let sniffed = ModuleInfo {
            title: "?!".to_string(),
            format: ModuleFormat::ScreamTracker,
        };
        assert_eq!(output_filename(12, &sniffed), "12.s3m");
    }
}
