//! Hierarchical view of a flat [`Toc`](super::Toc).

use super::TocEntry;
use indextree::{Arena, NodeId};
use serde::Serialize;

/// Headings arranged by nesting.
///
/// Each entry is a child of the closest preceding entry with a strictly
/// smaller depth. Entries without such a predecessor are roots, so skipped
/// levels (`#` straight to `###`) nest directly and a leading `##` is a root.
#[derive(Debug, Clone, Default)]
pub struct TocTree {
    arena: Arena<TocEntry>,
    roots: Vec<NodeId>,
}

/// Nested, serializable form of a [`TocTree`] node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocSection {
    pub value: String,
    pub url: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocSection>,
}

impl TocTree {
    pub(crate) fn from_entries(entries: &[TocEntry]) -> Self {
        let mut arena = Arena::new();
        let mut roots = Vec::new();
        let mut open: Vec<(usize, NodeId)> = Vec::new();

        for entry in entries {
            while open.last().is_some_and(|(depth, _)| *depth >= entry.depth) {
                open.pop();
            }

            let id = arena.new_node(entry.clone());
            match open.last() {
                Some((_, parent)) => parent.append(id, &mut arena),
                None => roots.push(id),
            }
            open.push((entry.depth, id));
        }

        Self { arena, roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Top-level entries in document order.
    pub fn roots(&self) -> impl Iterator<Item = &TocEntry> + '_ {
        self.roots.iter().map(|id| self.entry(*id))
    }

    fn entry(&self, id: NodeId) -> &TocEntry {
        self.arena[id].get()
    }

    /// Convert into nested sections, e.g. for JSON output.
    pub fn to_sections(&self) -> Vec<TocSection> {
        self.roots.iter().map(|id| self.section(*id)).collect()
    }

    fn section(&self, id: NodeId) -> TocSection {
        let entry = self.entry(id);
        TocSection {
            value: entry.value.clone(),
            url: entry.url.clone(),
            depth: entry.depth,
            children: id
                .children(&self.arena)
                .map(|child| self.section(child))
                .collect(),
        }
    }

    /// Render with box-drawing connectors, one heading per line.
    ///
    /// ```text
    /// Guide
    /// ├── Install
    /// │   └── From source
    /// └── Usage
    /// ```
    pub fn render_box_tree(&self) -> String {
        let mut out = String::new();
        for id in &self.roots {
            out.push_str(&self.entry(*id).value);
            out.push('\n');
            self.render_children(*id, "", &mut out);
        }
        out
    }

    fn render_children(&self, id: NodeId, prefix: &str, out: &mut String) {
        let children: Vec<NodeId> = id.children(&self.arena).collect();
        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            let connector = if is_last { "└── " } else { "├── " };
            out.push_str(prefix);
            out.push_str(connector);
            out.push_str(&self.entry(*child).value);
            out.push('\n');

            let extension = if is_last { "    " } else { "│   " };
            self.render_children(*child, &format!("{prefix}{extension}"), out);
        }
    }

    /// Render as a nested markdown link list.
    ///
    /// Nesting follows tree position rather than raw depth, so skipped
    /// levels never produce over-indented items.
    pub fn to_markdown_list(&self, bullet: &str, indent: usize) -> String {
        let mut out = String::new();
        for id in &self.roots {
            self.push_markdown_item(*id, 0, bullet, indent, &mut out);
        }
        out
    }

    fn push_markdown_item(
        &self,
        id: NodeId,
        level: usize,
        bullet: &str,
        indent: usize,
        out: &mut String,
    ) {
        let entry = self.entry(id);
        out.push_str(&" ".repeat(level * indent));
        out.push_str(&format!(
            "{bullet} [{}]({})\n",
            escape_link_text(&entry.value),
            entry.url
        ));

        for child in id.children(&self.arena) {
            self.push_markdown_item(child, level + 1, bullet, indent, out);
        }
    }
}

/// Backslash-escape characters that would end or nest the link text.
fn escape_link_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
