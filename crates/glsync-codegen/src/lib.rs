//! glsync Codegen
//!
//! Turns resolved symbols into header text and rewrites the target's
//! marker regions.
//!
//! ## Modules
//!
//! - `artifacts` - The six generated text blocks
//! - `region` - Marker region replacement
//! - `writer` - Atomic, change-only file output

pub mod artifacts;
pub mod region;
pub mod writer;

pub use artifacts::Artifacts;
pub use region::RegionUpdater;

use glsync_core::{Config, Error, Result, SyncReport};
use glsync_parser::{collect_symbols, PrototypeResolver, ReferenceCorpus};
use tracing::info;

/// Run the whole pipeline for one target header
///
/// Every symbol is resolved before the target is read, so a failed lookup
/// never touches the file. The target is written at most once, and only
/// when its content changes.
pub fn sync_header(config: &Config) -> Result<SyncReport> {
    config.validate()?;

    let corpus = ReferenceCorpus::load(config.reference_headers.as_slice())?;
    let symbols = collect_symbols(config)?;
    info!("{} symbols in use", symbols.len());

    let resolver = PrototypeResolver::new(&corpus, &config.settings.syntax)?;
    let resolved = resolver.resolve_all(&symbols)?;
    let artifacts = Artifacts::generate(&resolved, &config.settings.naming);

    let original =
        std::fs::read_to_string(&config.target).map_err(|e| Error::input(&config.target, e))?;
    let updater = RegionUpdater::new()?;
    let (updated, regions) = updater.apply(&original, &artifacts);

    let changed = updated != original;
    let written = if config.dry_run {
        false
    } else {
        writer::write_if_changed(&config.target, &original, &updated)?
    };

    if written {
        info!("Updated {}", config.target.display());
    } else if changed {
        info!("{} is out of date (dry run)", config.target.display());
    } else {
        info!("{} is up to date", config.target.display());
    }

    Ok(SyncReport {
        target: config.target.clone(),
        symbols: resolved,
        regions,
        changed,
        written,
    })
}
