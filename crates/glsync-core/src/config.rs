//! Configuration types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// glsync run configuration
///
/// Built once at startup and passed by reference to every stage of the
/// pipeline. Nothing mutates it after [`Config::validate`] succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for call sites
    pub source_dir: PathBuf,

    /// Header file whose marker regions are rewritten
    pub target: PathBuf,

    /// Headers the declarations are looked up in
    pub reference_headers: Vec<PathBuf>,

    /// Symbols included even without a call site
    pub explicit_symbols: Vec<String>,

    /// Compute the result but never write the target
    pub dry_run: bool,

    /// Naming, scanning and declaration syntax settings
    pub settings: Settings,
}

impl Config {
    /// Create a configuration with default settings
    pub fn new(source_dir: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target: target.into(),
            reference_headers: Vec::new(),
            explicit_symbols: Vec::new(),
            dry_run: false,
            settings: Settings::default(),
        }
    }

    /// Add reference headers, dropping repeats while keeping first-seen order
    pub fn with_reference_headers<I, P>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for header in headers {
            let header = header.into();
            if !self.reference_headers.contains(&header) {
                self.reference_headers.push(header);
            }
        }
        self
    }

    /// Add explicitly requested symbols
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit_symbols
            .extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Check the settings for values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        let naming = &self.settings.naming;
        check_identifier("api_prefix", &naming.api_prefix)?;
        check_identifier("alias_prefix", &naming.alias_prefix)?;
        check_identifier("table_macro", &naming.table_macro)?;
        check_identifier("entry_macro", &naming.entry_macro)?;
        if !naming
            .pointer_suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::Config(format!(
                "pointer_suffix '{}' is not an identifier fragment",
                naming.pointer_suffix
            )));
        }

        if self.settings.scan.extensions.is_empty() {
            return Err(Error::Config("no source extensions configured".into()));
        }

        Ok(())
    }
}

fn check_identifier(what: &str, value: &str) -> Result<()> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} '{}' is not a valid identifier",
            what, value
        )))
    }
}

/// Tunable settings, loadable from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Generated name shapes
    pub naming: NamingConfig,

    /// Source scanning
    pub scan: ScanConfig,

    /// Reference declaration syntax
    pub syntax: SyntaxConfig,
}

impl Settings {
    /// Load settings from a JSON file; absent fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::input(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Naming of the generated identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Prefix every API entry point starts with
    pub api_prefix: String,

    /// Prefix that turns a symbol into its aliased name
    pub alias_prefix: String,

    /// Suffix of the function pointer typedef names
    pub pointer_suffix: String,

    /// Name of the macro enumerating all symbols
    pub table_macro: String,

    /// Name of the per-symbol macro inside the table
    pub entry_macro: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            api_prefix: "gl".into(),
            alias_prefix: "ts".into(),
            pointer_suffix: "_ptr".into(),
            table_macro: "GLDEFS".into(),
            entry_macro: "GLDEF".into(),
        }
    }
}

/// Source scanning configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to scan
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["c".into()],
        }
    }
}

/// Regex fragments describing a reference declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Linkage marker opening the declaration (`GLAPI`, `GL_APICALL`, ...)
    pub linkage: String,

    /// Calling convention marker before the name (`APIENTRY`, `GL_APIENTRY`, ...)
    pub convention: String,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            linkage: r"GL_?API(?:CALL)?".into(),
            convention: r"(?:GL_?)?APIENTRY".into(),
        }
    }
}
