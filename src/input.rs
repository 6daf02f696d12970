//! Input handling for file and stdin sources.

use crate::error::{Error, Result};
use crate::pipeline::File;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Markdown read from a file or from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File { path: PathBuf, content: String },
    Stdin(String),
}

impl InputSource {
    pub fn content(&self) -> &str {
        match self {
            InputSource::File { content, .. } | InputSource::Stdin(content) => content,
        }
    }

    /// Turn into a pipeline document, keeping the path when there is one.
    pub fn into_file(self) -> File {
        match self {
            InputSource::File { path, content } => File::new(content).with_path(path),
            InputSource::Stdin(content) => File::new(content),
        }
    }
}

/// Resolve where the markdown comes from.
///
/// `-` reads stdin explicitly. With no path at all, stdin is read only when it
/// is not a terminal; otherwise [`Error::NoInput`] is returned so the caller
/// can print usage instead of blocking.
pub fn read_input(file: Option<&Path>) -> Result<InputSource> {
    match file {
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => read_file(path),
        None if io::stdin().is_terminal() => Err(Error::NoInput),
        None => read_stdin(),
    }
}

pub fn read_file(path: &Path) -> Result<InputSource> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(InputSource::File {
        path: path.to_path_buf(),
        content,
    })
}

fn read_stdin() -> Result<InputSource> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(InputSource::Stdin(content))
}
