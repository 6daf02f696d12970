//! Markdown parsing into a typed syntax tree.
//!
//! Tokenizing is delegated to `pulldown-cmark`; this module folds its event
//! stream into [`Node`]s so later steps can walk and pattern-match a real tree.

mod ast;
mod builder;

pub use ast::Node;

use pulldown_cmark::{Options, Parser};
use serde::{Deserialize, Serialize};

/// Parser extensions beyond CommonMark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// GitHub Flavored Markdown: tables, strikethrough, task lists, footnotes.
    #[serde(default)]
    pub gfm: bool,

    /// Recognize a leading `---` YAML block as front matter instead of a
    /// thematic break followed by a setext heading.
    #[serde(default)]
    pub front_matter: bool,
}

impl ParseOptions {
    pub fn gfm() -> Self {
        Self {
            gfm: true,
            ..Self::default()
        }
    }

    fn to_pulldown(self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.front_matter {
            options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
        }
        options
    }
}

/// Parse markdown content into a [`Node::Root`] tree.
///
/// Any string is accepted; input without markdown structure becomes a single
/// paragraph, and the empty string an empty root.
///
/// # Examples
///
/// ```
/// use mdtoc::parser::{parse_markdown, Node, ParseOptions};
///
/// let root = parse_markdown("# Title\n\nBody", &ParseOptions::default());
/// assert_eq!(root.children().len(), 2);
/// assert_eq!(root.children()[0].heading_depth(), Some(1));
/// ```
pub fn parse_markdown(content: &str, options: &ParseOptions) -> Node {
    let parser = Parser::new_ext(content, options.to_pulldown());
    builder::TreeBuilder::new().build(parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(md: &str) -> Node {
        parse_markdown(md, &ParseOptions::default())
    }

    fn headings(root: &Node) -> Vec<(u8, String)> {
        let mut found = Vec::new();
        root.walk(&mut |node| {
            if let Some(depth) = node.heading_depth() {
                found.push((depth, node.to_plain_text()));
            }
        });
        found
    }

    #[test]
    fn test_parse_headings() {
        let md = r#"# Title
Some content

## Section 1
More content

### Subsection
Details

## Section 2
End"#;

        assert_eq!(
            headings(&parse(md)),
            vec![
                (1, "Title".to_string()),
                (2, "Section 1".to_string()),
                (3, "Subsection".to_string()),
                (2, "Section 2".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_headings_with_bold() {
        let md = r#"# Title

## **Bold** Section

#### **1. Item** with number"#;

        let found = headings(&parse(md));
        assert_eq!(found[1].1, "Bold Section");
        assert_eq!(found[2], (4, "1. Item with number".to_string()));
    }

    #[test]
    fn test_setext_and_closing_hashes() {
        let md = "Top\n===\n\nSub\n---\n\n### Closed ###";
        assert_eq!(
            headings(&parse(md)),
            vec![
                (1, "Top".to_string()),
                (2, "Sub".to_string()),
                (3, "Closed".to_string()),
            ]
        );
    }

    #[test]
    fn test_code_blocks_are_not_headings() {
        let md = "# Real\n\n```md\n# Fake\n```\n\n    # Also fake\n";
        let root = parse(md);
        assert_eq!(headings(&root), vec![(1, "Real".to_string())]);

        match &root.children()[1] {
            Node::Code { lang, value } => {
                assert_eq!(lang.as_deref(), Some("md"));
                assert_eq!(value, "# Fake");
            }
            other => panic!("Expected Code node, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_plain_input() {
        assert_eq!(parse(""), Node::Root { children: vec![] });

        let root = parse("plain text, no headings");
        assert_eq!(root.children().len(), 1);
        assert!(matches!(root.children()[0], Node::Paragraph { .. }));
    }

    #[test]
    fn test_adjacent_text_is_merged() {
        let root = parse("# one\n\nthree\nfour");
        match &root.children()[1] {
            Node::Paragraph { children } => {
                assert_eq!(
                    children,
                    &vec![Node::Text {
                        value: "three\nfour".to_string()
                    }]
                );
            }
            other => panic!("Expected Paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_nodes_in_heading() {
        let root = parse("## [Docs](https://example.com \"Home\") and ![logo](l.png)");
        let Node::Heading { children, .. } = &root.children()[0] else {
            panic!("Expected Heading");
        };

        assert!(matches!(
            &children[0],
            Node::Link { url, title: Some(title), .. } if url == "https://example.com" && title == "Home"
        ));
        assert!(matches!(
            &children[2],
            Node::Image { alt, title: None, .. } if alt == "logo"
        ));
        assert_eq!(root.children()[0].to_plain_text(), "Docs and logo");
    }

    #[test]
    fn test_gfm_extensions() {
        let md = "# ~~Old~~ New\n\n- [x] done\n- [ ] todo\n\n| a |\n|---|\n| b |";

        let plain = parse(md);
        assert_eq!(headings(&plain), vec![(1, "~~Old~~ New".to_string())]);

        let gfm = parse_markdown(md, &ParseOptions::gfm());
        assert_eq!(headings(&gfm), vec![(1, "Old New".to_string())]);

        let Node::List { children, .. } = &gfm.children()[1] else {
            panic!("Expected List");
        };
        assert!(matches!(children[0], Node::ListItem { checked: Some(true), .. }));
        assert!(matches!(children[1], Node::ListItem { checked: Some(false), .. }));
        assert!(matches!(gfm.children()[2], Node::Table { .. }));
    }

    #[test]
    fn test_front_matter() {
        let md = "---\ntitle: Post\n---\n\n# Body";

        let without = parse(md);
        assert_eq!(
            headings(&without),
            vec![(2, "title: Post".to_string()), (1, "Body".to_string())]
        );

        let with = parse_markdown(
            md,
            &ParseOptions {
                front_matter: true,
                ..ParseOptions::default()
            },
        );
        assert_eq!(headings(&with), vec![(1, "Body".to_string())]);
        assert_eq!(
            with.children()[0],
            Node::Yaml {
                value: "title: Post".to_string()
            }
        );
    }
}
