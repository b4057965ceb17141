use anyhow::Result;
use clap::{Parser, ValueEnum};
use elfhdr_core::{Binary, MagicCheck, Report};
use serde::Serialize;
use std::process::ExitCode;

/// Exit status for every failure: bad arguments, unreadable file, not an ELF file.
const EXIT_FAILURE: u8 = 98;

/// Display the ELF header of a binary
#[derive(Parser)]
#[command(
    name = "elfhdr",
    about = "Display the information contained in the ELF header of a file",
    version,
    author
)]
struct Cli {
    /// Path to ELF file
    #[arg(required = true)]
    path: std::path::PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Require each magic byte at its exact position
    #[arg(long)]
    strict_magic: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// readelf-style listing
    Text,
    /// Pretty-printed JSON object
    Json,
}

#[derive(Serialize)]
struct JsonReport {
    magic: String,
    class: String,
    data: String,
    version: String,
    os_abi: String,
    abi_version: String,
    #[serde(rename = "type")]
    object_type: String,
    entry_point: String,
}

impl From<&Report> for JsonReport {
    fn from(report: &Report) -> Self {
        JsonReport {
            magic: report.magic_hex(),
            class: report.class.to_string(),
            data: report.data.to_string(),
            version: report.version.to_string(),
            os_abi: report.os_abi.to_string(),
            abi_version: report.abi_version.to_string(),
            object_type: report.object_type.to_string(),
            entry_point: report.entry_point.to_string(),
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let check = if cli.strict_magic {
        MagicCheck::Positional
    } else {
        MagicCheck::Membership
    };

    let bin = Binary::open(&cli.path, check)?;
    let report = bin.report();

    match cli.format {
        Format::Text => print!("{report}"),
        Format::Json => {
            let json = serde_json::to_string_pretty(&JsonReport::from(&report))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    log::info!("Reading ELF header of {}", cli.path.display());
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
