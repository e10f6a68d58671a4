//! `jbfpak info` — dump the decoded directory without extracting.

use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::Path;

use anyhow::Context;
use serde_json::json;

use jbfpak_format::{NUM_SLOTS, PakHeader};

use crate::OutputFormat;
use crate::output::{
    OutputStyle, create_table, format_key_value, header_cell, numeric_cell, regular_cell,
};

/// Handle the `info` subcommand.
pub fn handle(pack: &Path, program: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let mut pack_file = BufReader::new(
        File::open(pack).with_context(|| format!("opening pack {}", pack.display()))?,
    );
    let mut program_file = match program {
        Some(path) => Some(BufReader::new(
            File::open(path).with_context(|| format!("opening program {}", path.display()))?,
        )),
        None => None,
    };

    let eof = pack_file.seek(SeekFrom::End(0))?;
    let header = PakHeader::decode(&mut pack_file, program_file.as_mut())?;
    let entries = header.directory(eof);
    let description = header.description();

    match format {
        OutputFormat::Text => {
            let style = OutputStyle::new();
            if let Some(name) = header.lock_program() {
                println!("{}", format_key_value("Locked to", name, &style));
            }
            if !description.is_empty() {
                println!("{}", format_key_value("Description", &description, &style));
            }
            println!(
                "{}",
                format_key_value(
                    "Used slots",
                    &format!("{}/{NUM_SLOTS}", entries.len()),
                    &style
                )
            );

            if !entries.is_empty() {
                let mut table = create_table(&style);
                table.set_header(vec![
                    header_cell("Slot", &style),
                    header_cell("Offset", &style),
                    header_cell("Size", &style),
                    header_cell("Key", &style),
                ]);
                for entry in &entries {
                    table.add_row(vec![
                        numeric_cell(&entry.index.to_string()),
                        numeric_cell(&format!("{:#x}", entry.offset)),
                        numeric_cell(&entry.size.to_string()),
                        regular_cell(&hex::encode(entry.key)),
                    ]);
                }
                println!("{table}");
            }
        }
        OutputFormat::Json => {
            let slots: Vec<_> = entries
                .iter()
                .map(|entry| {
                    json!({
                        "slot": entry.index,
                        "offset": entry.offset,
                        "size": entry.size,
                        "key": hex::encode(entry.key),
                    })
                })
                .collect();
            let value = json!({
                "description": description,
                "lock_program": header.lock_program(),
                "used_slots": entries.len(),
                "slots": slots,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}
