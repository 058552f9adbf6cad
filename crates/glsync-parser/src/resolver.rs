//! Prototype resolution
//!
//! Looks up each symbol's declaration in the reference corpus with a
//! bounded structural pattern:
//!
//! ```text
//! <linkage> <return type> <convention> NAME ( <params> ) ;
//! ```
//!
//! The pattern may span lines. The first match in corpus order wins; a
//! symbol with no match fails the whole run.

use crate::corpus::ReferenceCorpus;
use crate::symbols::SymbolSet;
use glsync_core::config::SyntaxConfig;
use glsync_core::{Error, Prototype, ResolvedSymbol, Result, Symbol};
use regex::Regex;
use std::sync::OnceLock;
use tracing::info;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn param_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*").expect("static regex"))
}

/// Resolves symbols against a reference corpus
pub struct PrototypeResolver<'a> {
    corpus: &'a ReferenceCorpus,
    syntax: SyntaxConfig,
}

impl<'a> PrototypeResolver<'a> {
    /// Create a resolver, checking that the syntax fragments compile
    pub fn new(corpus: &'a ReferenceCorpus, syntax: &SyntaxConfig) -> Result<Self> {
        declaration_pattern(syntax, "probe")?;
        Ok(Self {
            corpus,
            syntax: syntax.clone(),
        })
    }

    /// Find the declaration of one symbol
    pub fn resolve(&self, symbol: &Symbol) -> Result<Prototype> {
        let pattern = declaration_pattern(&self.syntax, symbol.as_str())?;
        let caps = pattern
            .captures(self.corpus.text())
            .ok_or_else(|| Error::UnresolvedSymbol(symbol.to_string()))?;

        let declaration = whitespace_run().replace_all(&caps["decl"], " ").into_owned();
        let params = param_separator()
            .split(&caps["params"])
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Prototype {
            declaration,
            return_type: caps["rtype"].trim().to_string(),
            convention: caps["conv"].to_string(),
            params,
        })
    }

    /// Resolve every symbol, stopping at the first failure
    pub fn resolve_all(&self, symbols: &SymbolSet) -> Result<Vec<ResolvedSymbol>> {
        symbols
            .iter()
            .map(|symbol| {
                let prototype = self.resolve(symbol)?;
                info!("Found {:<50}: {}", symbol.as_str(), prototype.declaration);
                Ok(ResolvedSymbol {
                    symbol: symbol.clone(),
                    prototype,
                })
            })
            .collect()
    }
}

fn declaration_pattern(syntax: &SyntaxConfig, name: &str) -> Result<Regex> {
    let pattern = format!(
        r"(?ms)^(?P<decl>(?:{linkage})\s+(?P<rtype>[a-zA-Z_0-9\s]+?\**)\s*(?P<conv>(?:{conv}))\s+{name}\s*\(\s*(?P<params>.*?)\s*\)\s*;)",
        linkage = syntax.linkage,
        conv = syntax.convention,
        name = regex::escape(name),
    );
    Regex::new(&pattern).map_err(|e| Error::Pattern(e.to_string()))
}
