use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

use jbfpak_client::{OutputFormat, commands};

#[derive(Parser)]
#[command(
    name = "jbfpak",
    about = "Extract tracker modules from JBFMod pack (.pak) files",
    version,
    long_about = "A command-line tool for unpacking .pak containers produced by ToPack for \
                  the jbfmod player library. Modules are decrypted, sniffed for their tracker \
                  format (MOD/S3M/XM/IT), and written out one file per directory slot, \
                  prefixed with the slot index (0-63). Packs locked to a specific program \
                  need that program supplied with --program."
)]
struct Cli {
    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract all modules from a pack
    Extract {
        /// The pack (.pak) file to extract
        pack: PathBuf,

        /// Destination directory for extracted modules
        #[arg(default_value = ".")]
        destination: PathBuf,

        /// Program the pack is locked to, when there is one
        #[arg(short, long)]
        program: Option<PathBuf>,
    },

    /// Show a pack's description and directory without extracting
    Info {
        /// The pack (.pak) file to inspect
        pack: PathBuf,

        /// Program the pack is locked to, when there is one
        #[arg(short, long)]
        program: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    // Handle commands
    match cli.command {
        Commands::Extract {
            pack,
            destination,
            program,
        } => commands::extract::handle(&pack, &destination, program.as_deref(), cli.format)?,
        Commands::Info { pack, program } => {
            commands::info::handle(&pack, program.as_deref(), cli.format)?;
        }
    }

    Ok(())
}
