//! Markup parsing, plain-text projection and serialization
//!
//! Vacancy fields arrive as HTML fragments. They are parsed with `scraper`
//! into an owned [`MarkupNode`] tree so transforms can rebuild text nodes
//! without depending on the parser's arena types, then written back out.

use scraper::{ElementRef, Html, Node};

/// Elements whose text is never scanned for skills.
pub const OPAQUE_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose text content is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Elements whose content is parsed as text, so child tags written into
/// them would read back as literal text.
const RCDATA_ELEMENTS: &[&str] = &["textarea", "title"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Text(String),
    Comment(String),
    Element(MarkupElement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

/// Result of parsing a fragment. The parser always recovers a tree; `errors`
/// records whether the input needed recovery.
#[derive(Debug, Clone)]
pub struct ParsedFragment {
    pub nodes: Vec<MarkupNode>,
    pub errors: Vec<String>,
}

impl MarkupElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(MarkupNode::Text(text.into()));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn is_opaque(&self) -> bool {
        OPAQUE_ELEMENTS.contains(&self.name.as_str())
    }

    /// True when the element cannot hold child elements.
    pub fn holds_raw_text(&self) -> bool {
        let name = self.name.as_str();
        RAW_TEXT_ELEMENTS.contains(&name) || RCDATA_ELEMENTS.contains(&name)
    }
}

impl ParsedFragment {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse an HTML fragment in a `<body>` context.
pub fn parse_fragment(markup: &str) -> ParsedFragment {
    let html = Html::parse_fragment(markup);
    let nodes = convert_children(html.root_element());
    let errors = html.errors.iter().map(|e| e.to_string()).collect();
    ParsedFragment { nodes, errors }
}

fn convert_children(element: ElementRef<'_>) -> Vec<MarkupNode> {
    let mut nodes = Vec::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let text: &str = text;
                nodes.push(MarkupNode::Text(text.to_string()));
            }
            Node::Comment(comment) => {
                let comment: &str = comment;
                nodes.push(MarkupNode::Comment(comment.to_string()));
            }
            Node::Element(el) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    let mut attrs: Vec<(String, String)> = el
                        .attrs
                        .iter()
                        .map(|(name, value)| {
                            // Keep foreign prefixes such as `xlink:`.
                            let name = match &name.prefix {
                                Some(prefix) => format!("{}:{}", prefix, name.local),
                                None => name.local.to_string(),
                            };
                            (name, value.to_string())
                        })
                        .collect();
                    // Parser storage order varies; emit attributes by name.
                    attrs.sort_by(|a, b| a.0.cmp(&b.0));
                    nodes.push(MarkupNode::Element(MarkupElement {
                        name: el.name().to_string(),
                        attrs,
                        children: convert_children(child_ref),
                    }));
                }
            }
            _ => {}
        }
    }
    nodes
}

/// Visible text of a fragment: all text nodes outside `script`/`style`,
/// entities decoded.
pub fn strip_markup(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    plain_text(&parse_fragment(markup).nodes)
}

pub fn plain_text(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[MarkupNode], out: &mut String) {
    for node in nodes {
        match node {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Element(el) if !el.is_opaque() => collect_text(&el.children, out),
            _ => {}
        }
    }
}

pub fn serialize(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    write_nodes(nodes, false, &mut out);
    out
}

fn write_nodes(nodes: &[MarkupNode], raw_text: bool, out: &mut String) {
    for node in nodes {
        match node {
            MarkupNode::Text(text) if raw_text => out.push_str(text),
            MarkupNode::Text(text) => out.push_str(&escape_text(text)),
            MarkupNode::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            MarkupNode::Element(el) => write_element(el, out),
        }
    }
}

fn write_element(el: &MarkupElement, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.name.as_str()) {
        return;
    }

    write_nodes(
        &el.children,
        RAW_TEXT_ELEMENTS.contains(&el.name.as_str()),
        out,
    );
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}

/// Escape text for use as HTML element content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}
