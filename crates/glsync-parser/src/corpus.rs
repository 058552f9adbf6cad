//! Reference corpus loading

use glsync_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Text of all reference headers, joined with newlines
#[derive(Debug, Clone, Default)]
pub struct ReferenceCorpus {
    text: String,
    sources: Vec<PathBuf>,
}

impl ReferenceCorpus {
    /// Read every header in order. Any unreadable header fails the whole load.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut parts = Vec::with_capacity(paths.len());
        let mut sources = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            info!("Using {}", path.display());
            let text = std::fs::read_to_string(path).map_err(|e| Error::input(path, e))?;
            parts.push(text);
            sources.push(path.to_path_buf());
        }

        Ok(Self {
            text: parts.join("\n"),
            sources,
        })
    }

    /// Corpus built from in-memory text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Headers the corpus was read from
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
