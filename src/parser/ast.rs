//! Typed markdown syntax tree.
//!
//! Node names and the serialized `type` tag follow mdast conventions, so a
//! tree dumped as JSON looks familiar to anyone who has used remark.

use serde::Serialize;

/// A node of the markdown syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root {
        children: Vec<Node>,
    },
    Paragraph {
        children: Vec<Node>,
    },
    /// ATX or setext heading; `depth` is the level (1-6).
    Heading {
        depth: u8,
        children: Vec<Node>,
    },
    ThematicBreak,
    Blockquote {
        children: Vec<Node>,
    },
    List {
        ordered: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        start: Option<u64>,
        children: Vec<Node>,
    },
    ListItem {
        #[serde(skip_serializing_if = "Option::is_none")]
        checked: Option<bool>,
        children: Vec<Node>,
    },
    Code {
        #[serde(skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        value: String,
    },
    Html {
        value: String,
    },
    /// Leading YAML front matter block.
    Yaml {
        value: String,
    },
    Table {
        children: Vec<Node>,
    },
    TableRow {
        children: Vec<Node>,
    },
    TableCell {
        children: Vec<Node>,
    },
    FootnoteDefinition {
        label: String,
        children: Vec<Node>,
    },
    Text {
        value: String,
    },
    Emphasis {
        children: Vec<Node>,
    },
    Strong {
        children: Vec<Node>,
    },
    Delete {
        children: Vec<Node>,
    },
    InlineCode {
        value: String,
    },
    Break,
    Link {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        children: Vec<Node>,
    },
    Image {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        alt: String,
    },
    FootnoteReference {
        label: String,
    },
}

impl Node {
    /// Child nodes, or an empty slice for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children }
            | Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::Blockquote { children }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::Table { children }
            | Node::TableRow { children }
            | Node::TableCell { children }
            | Node::FootnoteDefinition { children, .. }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Delete { children }
            | Node::Link { children, .. } => children,
            Node::ThematicBreak
            | Node::Code { .. }
            | Node::Html { .. }
            | Node::Yaml { .. }
            | Node::Text { .. }
            | Node::InlineCode { .. }
            | Node::Break
            | Node::Image { .. }
            | Node::FootnoteReference { .. } => &[],
        }
    }

    /// Literal content of nodes that carry one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Code { value, .. }
            | Node::Html { value }
            | Node::Yaml { value }
            | Node::Text { value }
            | Node::InlineCode { value } => Some(value.as_str()),
            _ => None,
        }
    }

    /// Heading level, if this node is a heading.
    pub fn heading_depth(&self) -> Option<u8> {
        match self {
            Node::Heading { depth, .. } => Some(*depth),
            _ => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root { children }
            | Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::Blockquote { children }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::Table { children }
            | Node::TableRow { children }
            | Node::TableCell { children }
            | Node::FootnoteDefinition { children, .. }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Delete { children }
            | Node::Link { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Depth-first, pre-order walk calling `visitor` on every node,
    /// starting with `self`.
    pub fn walk<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Node),
    {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            visitor(node);
            stack.extend(node.children().iter().rev());
        }
    }

    /// Concatenate all descendant text, discarding formatting.
    ///
    /// Literal nodes (text, inline code, code, html) contribute their value,
    /// images contribute their alt text, everything else contributes the
    /// text of its children.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdtoc::parser::{parse_markdown, ParseOptions};
    ///
    /// let root = parse_markdown("# Hello **World** and `code`", &ParseOptions::default());
    /// assert_eq!(root.children()[0].to_plain_text(), "Hello World and code");
    /// ```
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(value) = node.value() {
                out.push_str(value);
            } else if let Node::Image { alt, .. } = node {
                out.push_str(alt);
            } else {
                stack.extend(node.children().iter().rev());
            }
        }
        out
    }
}

// The derived drop glue recurses once per nesting level; flatten instead.
impl Drop for Node {
    fn drop(&mut self) {
        let Some(children) = self.children_mut() else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children_mut() {
                pending.append(children);
            }
        }
    }
}
