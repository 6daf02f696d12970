//! Error types for TOC extraction.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading input, running transform steps or persisting
/// configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No file argument and stdin is a terminal.
    #[error("no input: pass a markdown file, '-' for stdin, or pipe content in")]
    NoInput,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A transform step refused the tree.
    #[error("transform `{name}` failed: {message}")]
    Transform { name: String, message: String },

    #[error("failed to serialize config: {0}")]
    Config(#[from] toml::ser::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
