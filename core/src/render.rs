//! Collapsible, syntax-classified rendering of JSON responses.
//!
//! Rendering produces a [`JsonTree`] of nodes; the tree only tracks which
//! groups are expanded. [`JsonTree::lines`] flattens the visible part into
//! rows of classified spans for display.

use serde::Serialize;
use serde_json::Value;

use crate::discovery::ServiceContext;
use crate::link::{is_link, LinkResolver, LinkTarget};

const PLACEHOLDER_TEXT: &str = "...";
const SEPARATOR_TEXT: &str = ",";

/// Classification of a span of rendered text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    Key,
    Null,
    Number,
    Boolean,
    String,
    /// Link to an arbitrary URL, opened in a new window.
    Link,
    /// Link to an explorer deep link.
    ExplorerLink,
    Punctuation,
    /// Collapsed group marker.
    Placeholder,
    /// Unformatted source that could not be parsed.
    Raw,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub class: TokenClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Span {
    fn new(text: impl Into<String>, class: TokenClass) -> Self {
        Self {
            text: text.into(),
            class,
            href: None,
        }
    }

    fn link(text: impl Into<String>, class: TokenClass, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class,
            href: Some(href.into()),
        }
    }
}

/// A scalar on a single row.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    pub depth: usize,
    /// `"key": ` for object members, empty for array elements and the root.
    pub title: String,
    pub value: Vec<Span>,
    pub separator: bool,
}

/// An array or object with a clickable header.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub depth: usize,
    pub title: String,
    pub open: &'static str,
    pub close: &'static str,
    pub children: Vec<RenderNode>,
    pub expanded: bool,
    pub separator: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderNode {
    Leaf(Leaf),
    Group(Group),
    Raw(String),
}

/// One visible row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Line {
    pub spans: Vec<Span>,
    /// Path of the group this row collapses or expands when clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle: Option<Vec<usize>>,
}

impl Line {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Turns parsed JSON into render nodes, linking URLs of the current service
/// back into the explorer.
pub struct JsonTreeRenderer<'a> {
    resolver: Option<LinkResolver<'a>>,
}

impl<'a> JsonTreeRenderer<'a> {
    pub fn new(ctx: &'a dyn ServiceContext) -> Self {
        Self {
            resolver: Some(LinkResolver::new(ctx.service())),
        }
    }

    /// Renderer that treats every URL as external.
    pub fn without_links() -> Self {
        Self { resolver: None }
    }

    /// Format response text. Blank text renders nothing; text that is not
    /// JSON is shown verbatim.
    pub fn prettify(&self, source: &str) -> Option<JsonTree> {
        if source.trim().is_empty() {
            return None;
        }
        let root = match serde_json::from_str::<Value>(source) {
            Ok(value) => self.render(&value, String::new(), 0, false),
            Err(e) => {
                tracing::debug!(error = %e, "Response is not JSON, showing raw text");
                RenderNode::Raw(source.to_string())
            }
        };
        Some(JsonTree { root })
    }

    /// Render one value at a depth. `separator` is set for every child but
    /// the last of its parent.
    pub fn render(&self, value: &Value, title: String, depth: usize, separator: bool) -> RenderNode {
        let spans = match value {
            Value::Null => vec![Span::new("null", TokenClass::Null)],
            Value::Bool(b) => vec![Span::new(b.to_string(), TokenClass::Boolean)],
            Value::Number(n) => vec![Span::new(n.to_string(), TokenClass::Number)],
            Value::String(s) => self.string_spans(s),
            Value::Array(items) => {
                let last = items.len().saturating_sub(1);
                let children = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.render(item, String::new(), depth + 1, i < last))
                    .collect();
                return RenderNode::Group(Group {
                    depth,
                    title,
                    open: "[",
                    close: "]",
                    children,
                    expanded: true,
                    separator,
                });
            }
            Value::Object(members) => {
                let last = members.len().saturating_sub(1);
                let children = members
                    .iter()
                    .enumerate()
                    .map(|(i, (key, member))| {
                        self.render(member, format!("\"{}\": ", key), depth + 1, i < last)
                    })
                    .collect();
                return RenderNode::Group(Group {
                    depth,
                    title,
                    open: "{",
                    close: "}",
                    children,
                    expanded: true,
                    separator,
                });
            }
        };

        RenderNode::Leaf(Leaf {
            depth,
            title,
            value: spans,
            separator,
        })
    }

    fn string_spans(&self, raw: &str) -> Vec<Span> {
        if !is_link(raw) {
            return vec![Span::new(format!("\"{}\"", raw), TokenClass::String)];
        }

        let link = match self.resolver.as_ref().map(|r| r.resolve(raw)) {
            Some(LinkTarget::Explorer(href)) => Span::link(raw, TokenClass::ExplorerLink, href),
            _ => Span::link(raw, TokenClass::Link, raw),
        };
        vec![
            Span::new("\"", TokenClass::String),
            link,
            Span::new("\"", TokenClass::String),
        ]
    }
}

/// A rendered response.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonTree {
    root: RenderNode,
}

impl JsonTree {
    pub fn root(&self) -> &RenderNode {
        &self.root
    }

    /// Flip the group at a child-position path (`[]` is the root). Returns
    /// the new expanded state, or `None` if the path does not name a group.
    pub fn toggle(&mut self, path: &[usize]) -> Option<bool> {
        let mut node = &mut self.root;
        for &index in path {
            node = match node {
                RenderNode::Group(group) => group.children.get_mut(index)?,
                _ => return None,
            };
        }
        match node {
            RenderNode::Group(group) => {
                group.expanded = !group.expanded;
                Some(group.expanded)
            }
            _ => None,
        }
    }

    /// Visible rows, top to bottom.
    pub fn lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        push_lines(&self.root, &mut Vec::new(), &mut lines);
        lines
    }

    pub fn to_text(&self) -> String {
        self.lines()
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn indentation(depth: usize) -> String {
    " ".repeat(depth)
}

fn push_lines(node: &RenderNode, path: &mut Vec<usize>, out: &mut Vec<Line>) {
    match node {
        RenderNode::Raw(text) => out.push(Line {
            spans: vec![Span::new(text.clone(), TokenClass::Raw)],
            toggle: None,
        }),
        RenderNode::Leaf(leaf) => {
            let mut spans = vec![Span::new(
                format!("{}{}", indentation(leaf.depth), leaf.title),
                TokenClass::Key,
            )];
            spans.extend(leaf.value.iter().cloned());
            if leaf.separator {
                spans.push(Span::new(SEPARATOR_TEXT, TokenClass::Punctuation));
            }
            out.push(Line { spans, toggle: None });
        }
        RenderNode::Group(group) => {
            out.push(Line {
                spans: vec![
                    Span::new(indentation(group.depth), TokenClass::Punctuation),
                    Span::new(format!("{}{}", group.title, group.open), TokenClass::Key),
                ],
                toggle: Some(path.clone()),
            });

            if group.expanded {
                for (i, child) in group.children.iter().enumerate() {
                    path.push(i);
                    push_lines(child, path, out);
                    path.pop();
                }
            } else {
                out.push(Line {
                    spans: vec![Span::new(
                        format!("{}{}", indentation(group.depth + 1), PLACEHOLDER_TEXT),
                        TokenClass::Placeholder,
                    )],
                    toggle: Some(path.clone()),
                });
            }

            let mut closing = format!("{}{}", indentation(group.depth), group.close);
            if group.separator {
                closing.push_str(SEPARATOR_TEXT);
            }
            out.push(Line {
                spans: vec![Span::new(closing, TokenClass::Punctuation)],
                toggle: None,
            });
        }
    }
}
