//! glsync Core
//!
//! Core types, configuration and errors shared by the glsync crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, Settings};
pub use error::{Error, Result};
pub use types::*;
