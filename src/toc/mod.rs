//! Table-of-contents extraction.
//!
//! [`collect_toc`] walks a parsed tree and turns every heading into a
//! [`TocEntry`] carrying its plain text, depth and a unique `#slug` anchor.
//! [`TocHeadings`] wraps the same walk as a pipeline transform that stores the
//! result in [`Data::toc`](crate::pipeline::Data::toc), and
//! [`extract_toc_headings`] drives the whole pipeline for a markdown string.
//!
//! The list is flat on purpose; use [`Toc::build_tree`] to recover the
//! hierarchy from the depth fields.

mod tree;

pub use tree::{TocSection, TocTree};

use crate::error::{Error, Result};
use crate::parser::{Node, ParseOptions};
use crate::pipeline::{File, Processor, Transformer};
use crate::slug::Slugger;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::Path;

/// One heading of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading text with formatting stripped.
    pub value: String,
    /// `#` followed by the heading's slug.
    pub url: String,
    /// Heading level, 1 for `#`.
    pub depth: usize,
}

/// Headings in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Toc(Vec<TocEntry>);

impl Toc {
    pub fn push(&mut self, entry: TocEntry) {
        self.0.push(entry);
    }

    pub fn into_vec(self) -> Vec<TocEntry> {
        self.0
    }

    /// Keep entries with `min <= depth <= max`.
    ///
    /// Anchors are left untouched: they were assigned against the whole
    /// document and still point at the right headings.
    pub fn filter_depth(&self, min: usize, max: usize) -> Toc {
        self.0
            .iter()
            .filter(|entry| (min..=max).contains(&entry.depth))
            .cloned()
            .collect()
    }

    /// Number of entries at each depth, ordered by depth.
    pub fn depth_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.0 {
            *counts.entry(entry.depth).or_insert(0) += 1;
        }
        counts
    }

    /// Rebuild the heading hierarchy from the depth fields.
    pub fn build_tree(&self) -> TocTree {
        TocTree::from_entries(&self.0)
    }
}

impl Deref for Toc {
    type Target = [TocEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<TocEntry> for Toc {
    fn from_iter<I: IntoIterator<Item = TocEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Toc {
    type Item = TocEntry;
    type IntoIter = std::vec::IntoIter<TocEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Toc {
    type Item = &'a TocEntry;
    type IntoIter = std::slice::Iter<'a, TocEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collect every heading of `tree` in pre-order.
///
/// Slugs are unique within the returned list; a fresh [`Slugger`] is used for
/// each call so separate documents never influence each other's anchors.
pub fn collect_toc(tree: &Node) -> Toc {
    let mut slugger = Slugger::new();
    let mut toc = Toc::default();

    tree.walk(&mut |node| {
        let Node::Heading { depth, .. } = node else {
            return;
        };

        let value = node.to_plain_text();
        let url = format!("#{}", slugger.slug(&value));
        trace!("heading depth={depth} url={url}");

        toc.push(TocEntry {
            value,
            url,
            depth: usize::from(*depth),
        });
    });

    toc
}

/// Transform step that stores the document's headings in `file.data.toc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocHeadings;

impl Transformer for TocHeadings {
    fn name(&self) -> &str {
        "toc-headings"
    }

    fn transform(&self, tree: &mut Node, file: &mut File) -> Result<()> {
        file.data.toc = Some(collect_toc(tree));
        Ok(())
    }
}

/// Create the heading-collecting transform step.
pub fn remark_toc_headings() -> TocHeadings {
    TocHeadings
}

/// Extract the table of contents of a CommonMark document.
///
/// # Examples
///
/// ```
/// use mdtoc::extract_toc_headings;
///
/// let toc = extract_toc_headings("## A\n## A").unwrap();
/// assert_eq!(toc[0].url, "#a");
/// assert_eq!(toc[1].url, "#a-1");
/// ```
///
/// # Errors
///
/// Returns whatever error a transform step raised; the built-in steps never
/// fail.
pub fn extract_toc_headings(markdown: &str) -> Result<Toc> {
    extract_toc_headings_with(markdown, &ParseOptions::default())
}

/// Like [`extract_toc_headings`], with explicit parser extensions.
pub fn extract_toc_headings_with(markdown: &str, options: &ParseOptions) -> Result<Toc> {
    let file = Processor::with_options(*options)
        .plugin(remark_toc_headings())
        .process(markdown)?;
    Ok(file.data.toc.unwrap_or_default())
}

/// Read a markdown file and extract its table of contents.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file cannot be read.
pub fn extract_file_toc(path: &Path, options: &ParseOptions) -> Result<Toc> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file = Processor::with_options(*options)
        .plugin(remark_toc_headings())
        .process(File::new(content).with_path(path))?;
    Ok(file.data.toc.unwrap_or_default())
}
