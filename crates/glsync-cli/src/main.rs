//! glsync CLI
//!
//! Updates a header with declarations of the GL functions used by all
//! source files in a directory.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glsync_core::{Config, Error, RegionStatus, Settings, SyncReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glsync")]
#[command(author, version, about = "Update a header file with prototypes of GL functions used by all files in a directory", long_about = None)]
struct Cli {
    /// Directory containing the source files to look for GL calls in
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Header file to modify
    #[arg(value_name = "HEADER")]
    header: PathBuf,

    /// Header to look up functions in; may be given multiple times
    #[arg(short = 'H', long = "gl-header", value_name = "FILE")]
    gl_headers: Vec<PathBuf>,

    /// Include this function even if no direct call was found; may be given multiple times
    #[arg(short, long = "function", value_name = "NAME")]
    functions: Vec<String>,

    /// JSON file with naming, scan and syntax settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Prefix of API function names
    #[arg(long)]
    api_prefix: Option<String>,

    /// Prefix of the aliased function names
    #[arg(long)]
    alias_prefix: Option<String>,

    /// Source file extension to scan; may be given multiple times
    #[arg(short, long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Report what would change without writing the header
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<Error>() {
            Some(Error::UnresolvedSymbol(_)) => {
                eprintln!("{}", err);
                ExitCode::from(1)
            }
            _ => {
                eprintln!("error: {:#}", err);
                ExitCode::from(2)
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let format = cli.format;
    let config = build_config(cli)?;
    debug!(?config, "configuration");
    let report = glsync_codegen::sync_header(&config)?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_report(&report, config.dry_run),
    }

    Ok(())
}

fn build_config(cli: Cli) -> Result<Config> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(prefix) = cli.api_prefix {
        settings.naming.api_prefix = prefix;
    }
    if let Some(prefix) = cli.alias_prefix {
        settings.naming.alias_prefix = prefix;
    }
    if !cli.extensions.is_empty() {
        settings.scan.extensions = cli
            .extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
    }

    Ok(Config::new(cli.dir, cli.header)
        .with_reference_headers(cli.gl_headers)
        .with_symbols(cli.functions)
        .with_settings(settings)
        .with_dry_run(cli.dry_run))
}

fn print_report(report: &SyncReport, dry_run: bool) {
    println!("{}: {} functions", report.target.display(), report.symbols.len());

    for region in &report.regions {
        let status = match region.status {
            RegionStatus::Updated if dry_run => "would update",
            RegionStatus::Updated => "updated",
            RegionStatus::Unchanged => "unchanged",
            RegionStatus::Missing => "markers not found",
        };
        println!("   {:<12} {}", region.key.as_str(), status);
    }

    if report.written {
        println!("   Header written");
    } else if report.changed {
        println!("   Header out of date, not written (dry run)");
    } else {
        println!("   Header up to date");
    }
}
