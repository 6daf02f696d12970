//! Folds the flat `pulldown-cmark` event stream into a [`Node`] tree.

use super::ast::Node;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag};

/// A container node whose end event has not been seen yet.
enum Open {
    Paragraph,
    Heading(u8),
    Blockquote,
    Code(Option<String>),
    Html,
    List(Option<u64>),
    ListItem(Option<bool>),
    FootnoteDefinition(String),
    Table,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Delete,
    Link { url: String, title: Option<String> },
    Image { url: String, title: Option<String> },
    Yaml,
}

struct Frame {
    open: Open,
    children: Vec<Node>,
}

/// Stack machine building the tree one event at a time.
pub(crate) struct TreeBuilder {
    stack: Vec<Frame>,
    root: Vec<Node>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: Vec::new(),
        }
    }

    pub(crate) fn build<'a>(mut self, events: impl Iterator<Item = Event<'a>>) -> Node {
        for event in events {
            self.push_event(event);
        }

        // The parser always balances start and end events; close anything
        // left open all the same so no content is lost.
        while !self.stack.is_empty() {
            self.close();
        }

        Node::Root {
            children: self.root,
        }
    }

    fn push_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.push_text(&text),
            Event::SoftBreak => self.push_text("\n"),
            Event::Code(code) => self.push_node(Node::InlineCode {
                value: code.into_string(),
            }),
            Event::Html(html) | Event::InlineHtml(html) => self.push_node(Node::Html {
                value: html.into_string(),
            }),
            Event::FootnoteReference(label) => self.push_node(Node::FootnoteReference {
                label: label.into_string(),
            }),
            Event::HardBreak => self.push_node(Node::Break),
            Event::Rule => self.push_node(Node::ThematicBreak),
            // Loose items wrap the marker in a paragraph, so look past it.
            Event::TaskListMarker(checked) => {
                let item = self.stack.iter_mut().rev().find_map(|frame| match &mut frame.open {
                    Open::ListItem(state) => Some(state),
                    _ => None,
                });
                if let Some(state) = item {
                    *state = Some(checked);
                }
            }
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let open = match tag {
            Tag::Paragraph => Open::Paragraph,
            Tag::Heading { level, .. } => Open::Heading(level as u8),
            Tag::BlockQuote => Open::Blockquote,
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => Open::Code(fence_lang(&info)),
            Tag::CodeBlock(CodeBlockKind::Indented) => Open::Code(None),
            Tag::HtmlBlock => Open::Html,
            Tag::List(start) => Open::List(start),
            Tag::Item => Open::ListItem(None),
            Tag::FootnoteDefinition(label) => Open::FootnoteDefinition(label.into_string()),
            Tag::Table(_) => Open::Table,
            Tag::TableHead | Tag::TableRow => Open::TableRow,
            Tag::TableCell => Open::TableCell,
            Tag::Emphasis => Open::Emphasis,
            Tag::Strong => Open::Strong,
            Tag::Strikethrough => Open::Delete,
            Tag::Link {
                dest_url, title, ..
            } => Open::Link {
                url: dest_url.into_string(),
                title: non_empty(title),
            },
            Tag::Image {
                dest_url, title, ..
            } => Open::Image {
                url: dest_url.into_string(),
                title: non_empty(title),
            },
            Tag::MetadataBlock(_) => Open::Yaml,
        };

        self.stack.push(Frame {
            open,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        let Some(Frame { open, children }) = self.stack.pop() else {
            return;
        };

        let node = match open {
            Open::Paragraph => Node::Paragraph { children },
            Open::Heading(depth) => Node::Heading { depth, children },
            Open::Blockquote => Node::Blockquote { children },
            Open::Code(lang) => Node::Code {
                lang,
                value: trim_final_newline(concat_text(&children)),
            },
            Open::Html => Node::Html {
                value: trim_final_newline(concat_text(&children)),
            },
            Open::List(start) => Node::List {
                ordered: start.is_some(),
                start,
                children,
            },
            Open::ListItem(checked) => Node::ListItem { checked, children },
            Open::FootnoteDefinition(label) => Node::FootnoteDefinition { label, children },
            Open::Table => Node::Table { children },
            Open::TableRow => Node::TableRow { children },
            Open::TableCell => Node::TableCell { children },
            Open::Emphasis => Node::Emphasis { children },
            Open::Strong => Node::Strong { children },
            Open::Delete => Node::Delete { children },
            Open::Link { url, title } => Node::Link {
                url,
                title,
                children,
            },
            Open::Image { url, title } => Node::Image {
                url,
                title,
                alt: concat_text(&children),
            },
            Open::Yaml => Node::Yaml {
                value: trim_final_newline(concat_text(&children)),
            },
        };

        self.push_node(node);
    }

    fn siblings(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root,
        }
    }

    fn push_node(&mut self, node: Node) {
        self.siblings().push(node);
    }

    /// Append text, merging with a directly preceding text node.
    fn push_text(&mut self, text: &str) {
        let siblings = self.siblings();
        if let Some(Node::Text { value }) = siblings.last_mut() {
            value.push_str(text);
        } else {
            siblings.push(Node::Text {
                value: text.to_string(),
            });
        }
    }
}

fn concat_text(children: &[Node]) -> String {
    children.iter().map(Node::to_plain_text).collect()
}

fn trim_final_newline(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
    }
    value
}

fn non_empty(value: CowStr<'_>) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.into_string())
    }
}

/// First word of a fence info string, e.g. `rust` for ```` ```rust,ignore ````.
fn fence_lang(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}
