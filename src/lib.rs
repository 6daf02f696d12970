//! # mdtoc
//!
//! Extract a table of contents from markdown documents.
//!
//! Every heading becomes a [`TocEntry`] with its plain text, its depth and a
//! GitHub-style `#slug` anchor that is unique within the document. The list is
//! flat and in document order; [`Toc::build_tree`] recovers the nesting when a
//! consumer needs it.
//!
//! ## Example
//!
//! ```rust
//! use mdtoc::extract_toc_headings;
//!
//! let markdown = r#"
//! ## Introduction
//! Some content here.
//!
//! ### Background
//! More details.
//!
//! ### Background
//! Same title, different anchor.
//! "#;
//!
//! let toc = extract_toc_headings(markdown).unwrap();
//! let urls: Vec<&str> = toc.iter().map(|e| e.url.as_str()).collect();
//! assert_eq!(urls, ["#introduction", "#background", "#background-1"]);
//! assert_eq!(toc[1].depth, 2);
//!
//! let tree = toc.build_tree();
//! print!("{}", tree.render_box_tree());
//! ```
//!
//! ## Pipeline
//!
//! The extraction runs as a transform step over a parsed tree, so it composes
//! with other steps:
//!
//! ```rust
//! use mdtoc::pipeline::Processor;
//! use mdtoc::{ParseOptions, remark_toc_headings};
//!
//! let file = Processor::with_options(ParseOptions::gfm())
//!     .plugin(remark_toc_headings())
//!     .process("# ~~Draft~~ Final")
//!     .unwrap();
//!
//! let toc = file.data.toc.unwrap();
//! assert_eq!(toc[0].value, "Draft Final");
//! ```

/// Configuration persisted in the platform config directory.
pub mod config;

/// Library error type.
pub mod error;

/// Input handling for file and stdin sources.
pub mod input;

/// Markdown parsing into a typed node tree.
pub mod parser;

/// Parse-and-transform processor and the document container.
pub mod pipeline;

/// Unique heading slugs.
pub mod slug;

/// Heading collection and TOC helpers.
pub mod toc;

pub use config::Config;
pub use error::{Error, Result};
pub use parser::{Node, ParseOptions, parse_markdown};
pub use toc::{
    Toc, TocEntry, TocHeadings, TocSection, TocTree, collect_toc, extract_file_toc,
    extract_toc_headings, extract_toc_headings_with, remark_toc_headings,
};
