//! glsync Parser
//!
//! Text-level extraction for glsync. Nothing here parses C properly; the
//! scanner and the resolver both work on regex matches over raw text.
//!
//! ## Modules
//!
//! - `corpus` - Concatenated reference header text
//! - `scanner` - Call-site discovery in a source tree
//! - `symbols` - Sorted, deduplicated symbol set
//! - `resolver` - Declaration lookup in the corpus

pub mod corpus;
pub mod resolver;
pub mod scanner;
pub mod symbols;

pub use corpus::ReferenceCorpus;
pub use resolver::PrototypeResolver;
pub use scanner::CallSiteScanner;
pub use symbols::SymbolSet;

use glsync_core::{Config, Result};

/// Scan the configured source tree and merge in the explicit symbols
pub fn collect_symbols(config: &Config) -> Result<SymbolSet> {
    let scanner = CallSiteScanner::new(&config.settings.naming, &config.settings.scan)?;
    let found = scanner.scan_directory(&config.source_dir)?;
    Ok(SymbolSet::build(found, config.explicit_symbols.as_slice()))
}
