//! Error types for glsync

use std::path::PathBuf;
use thiserror::Error;

/// glsync error type
#[derive(Error, Debug)]
pub enum Error {
    /// A reference header, source file, target or config file could not be read
    #[error("cannot read {}: {source}", path.display())]
    InputAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target file could not be written
    #[error("cannot write {}: {source}", path.display())]
    OutputAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A symbol has no declaration in the reference corpus
    #[error("Function '{0}' not found in the reference headers; update aborted")]
    UnresolvedSymbol(String),

    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::InputAccess {
            path: path.into(),
            source,
        }
    }

    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::OutputAccess {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for glsync
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_message_names_symbol() {
        let err = Error::UnresolvedSymbol("glFrobnicate".into());
        assert!(err.to_string().contains("'glFrobnicate'"));
    }

    #[test]
    fn test_input_error_names_path() {
        let err = Error::input(
            "/no/such/gl.h",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/no/such/gl.h"));
        assert!(msg.contains("missing"));
    }
}
