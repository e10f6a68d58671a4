//! `jbfpak extract` — unpack every module into a destination directory.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde_json::json;

use jbfpak_format::extract_pack;

use crate::OutputFormat;
use crate::output::{OutputStyle, format_header};

/// Handle the `extract` subcommand.
pub fn handle(
    pack: &Path,
    destination: &Path,
    program: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut pack_file = BufReader::new(
        File::open(pack).with_context(|| format!("opening pack {}", pack.display()))?,
    );
    let mut program_file = match program {
        Some(path) => Some(BufReader::new(
            File::open(path).with_context(|| format!("opening program {}", path.display()))?,
        )),
        None => None,
    };

    // Directory creation is glue, not core; the extractor expects it to exist.
    fs::create_dir_all(destination)
        .with_context(|| format!("creating {}", destination.display()))?;

    let report = extract_pack(&mut pack_file, destination, program_file.as_mut())?;

    match format {
        OutputFormat::Text => {
            let style = OutputStyle::new();
            if !report.description.is_empty() {
                println!("{}", format_header("Pack Info:", &style));
                println!("{}", report.description);
                println!();
            }
            for module in &report.modules {
                println!("Extracted: {}", module.filename);
            }
            println!();
            println!("Search complete. Extracted {} modules.", report.modules.len());
        }
        OutputFormat::Json => {
            let modules: Vec<_> = report
                .modules
                .iter()
                .map(|m| {
                    json!({
                        "index": m.index,
                        "filename": m.filename,
                        "title": m.title,
                        "format": m.format.extension(),
                        "size": m.size,
                    })
                })
                .collect();
            let value = json!({
                "description": report.description,
                "lock_program": report.lock_program,
                "modules": modules,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}
