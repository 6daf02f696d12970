//! Parse-then-transform processing of a single document.
//!
//! A [`Processor`] parses a [`File`] into a [`Node`] tree and hands the tree,
//! together with the file, to each registered [`Transformer`] in order.
//! Transformers report derived artifacts through [`File::data`].

use crate::error::Result;
use crate::parser::{Node, ParseOptions, parse_markdown};
use crate::toc::Toc;
use log::debug;
use std::path::PathBuf;

/// Metadata computed by transform steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Data {
    /// Table of contents written by [`crate::toc::TocHeadings`].
    pub toc: Option<Toc>,
}

/// A document travelling through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct File {
    /// Where the content was read from, if anywhere.
    pub path: Option<PathBuf>,
    /// Raw markdown.
    pub value: String,
    pub data: Data,
}

impl File {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<&str> for File {
    fn from(value: &str) -> Self {
        File::new(value)
    }
}

impl From<String> for File {
    fn from(value: String) -> Self {
        File::new(value)
    }
}

/// A tree transform step.
///
/// Implementations may inspect or rewrite the tree and attach results to the
/// file. They must not keep per-document state in `self`; anything scoped to
/// one run belongs on the stack of [`Transformer::transform`].
pub trait Transformer: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    fn transform(&self, tree: &mut Node, file: &mut File) -> Result<()>;
}

/// Parser configuration plus an ordered list of transform steps.
#[derive(Default)]
pub struct Processor {
    options: ParseOptions,
    transformers: Vec<Box<dyn Transformer>>,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            transformers: Vec::new(),
        }
    }

    /// Register a transform step; steps run in registration order.
    pub fn plugin(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }

    pub fn parse(&self, file: &File) -> Node {
        parse_markdown(&file.value, &self.options)
    }

    /// Run every transform step over `tree`, stopping at the first error.
    pub fn run(&self, tree: &mut Node, file: &mut File) -> Result<()> {
        for transformer in &self.transformers {
            debug!("running transform `{}`", transformer.name());
            transformer.transform(tree, file)?;
        }
        Ok(())
    }

    /// Parse and transform a document, returning it with its computed data.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a transform step, unchanged.
    pub fn process(&self, file: impl Into<File>) -> Result<File> {
        let mut file = file.into();
        let mut tree = self.parse(&file);
        self.run(&mut tree, &mut file)?;
        Ok(file)
    }
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.transformers.iter().map(|t| t.name()).collect();
        f.debug_struct("Processor")
            .field("options", &self.options)
            .field("transformers", &names)
            .finish()
    }
}
