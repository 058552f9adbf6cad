//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Name of an API entry point
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A declaration found in the reference corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prototype {
    /// Whole declaration, whitespace runs collapsed to one space
    pub declaration: String,
    /// Return type (`void`, `const GLubyte *`, ...)
    pub return_type: String,
    /// Calling convention marker (`APIENTRY`, `GLAPIENTRY`, ...)
    pub convention: String,
    /// Parameter list joined with `", "`
    pub params: String,
}

/// A symbol together with its declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSymbol {
    pub symbol: Symbol,
    pub prototype: Prototype,
}

/// The marker-delimited regions of the target header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKey {
    GlDefs,
    Undefs,
    Redefs,
    ReverseDefs,
    Typedefs,
    Protos,
}

impl RegionKey {
    /// Every region, in the order they are applied
    pub const ALL: [RegionKey; 6] = [
        RegionKey::GlDefs,
        RegionKey::Undefs,
        RegionKey::Redefs,
        RegionKey::ReverseDefs,
        RegionKey::Typedefs,
        RegionKey::Protos,
    ];

    /// Key as written inside the markers
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKey::GlDefs => "gldefs",
            RegionKey::Undefs => "undefs",
            RegionKey::Redefs => "redefs",
            RegionKey::ReverseDefs => "reversedefs",
            RegionKey::Typedefs => "typedefs",
            RegionKey::Protos => "protos",
        }
    }

    pub fn begin_marker(&self) -> String {
        format!("// @BEGIN:{}@", self.as_str())
    }

    pub fn end_marker(&self) -> String {
        format!("// @END:{}@", self.as_str())
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one region during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionStatus {
    /// Content differed and was replaced
    Updated,
    /// Content already matched the generated block
    Unchanged,
    /// No marker pair found; region left alone
    Missing,
}

/// Per-region outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOutcome {
    pub key: RegionKey,
    pub status: RegionStatus,
    /// Marker pairs found for this key
    pub occurrences: usize,
}

/// Summary of a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub target: PathBuf,
    pub symbols: Vec<ResolvedSymbol>,
    pub regions: Vec<RegionOutcome>,
    /// Whether the new content differs from the file on disk
    pub changed: bool,
    /// Whether the target was actually rewritten
    pub written: bool,
}

impl SyncReport {
    pub fn region(&self, key: RegionKey) -> Option<&RegionOutcome> {
        self.regions.iter().find(|r| r.key == key)
    }

    pub fn missing_regions(&self) -> impl Iterator<Item = RegionKey> + '_ {
        self.regions
            .iter()
            .filter(|r| r.status == RegionStatus::Missing)
            .map(|r| r.key)
    }
}
