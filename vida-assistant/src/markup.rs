//! The small inline markup subset messages may carry.
//!
//! Text is split into structured nodes instead of being turned into raw HTML,
//! so a surface decides how to style each node. [`to_html`] is provided for
//! web surfaces and escapes every payload before wrapping it.

/// One inline run of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    /// `**bold**`
    Strong(String),
    /// `*italic*`
    Emphasis(String),
    /// `` `code` ``
    Code(String),
    /// A bare `http://` or `https://` URL.
    Link(String),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Inline::Text(s)
            | Inline::Strong(s)
            | Inline::Emphasis(s)
            | Inline::Code(s)
            | Inline::Link(s) => s,
        }
    }
}

/// Splits `text` into inline nodes.
///
/// Markers without a closing partner, or with nothing between them, stay
/// literal text. Emphasis never nests.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match match_span(rest) {
            Some((node, consumed)) => {
                if !plain.is_empty() {
                    nodes.push(Inline::Text(std::mem::take(&mut plain)));
                }
                nodes.push(node);
                rest = &rest[consumed..];
            }
            None => {
                plain.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !plain.is_empty() {
        nodes.push(Inline::Text(plain));
    }
    nodes
}

/// Tries to read one marked-up span at the start of `s`.
///
/// Returns the node and the number of bytes it covers.
fn match_span(s: &str) -> Option<(Inline, usize)> {
    if let Some(inner) = s.strip_prefix('`') {
        let end = inner.find('`').filter(|&end| end > 0)?;
        return Some((Inline::Code(inner[..end].to_string()), end + 2));
    }

    if let Some(inner) = s.strip_prefix("**") {
        if let Some(end) = inner.find('*') {
            if end > 0 && inner[end..].starts_with("**") {
                return Some((Inline::Strong(inner[..end].to_string()), end + 4));
            }
        }
    }

    if let Some(inner) = s.strip_prefix('*') {
        let end = inner.find('*').filter(|&end| end > 0)?;
        return Some((Inline::Emphasis(inner[..end].to_string()), end + 2));
    }

    if s.starts_with("http://") || s.starts_with("https://") {
        let end = s
            .find(|c: char| c.is_whitespace() || c == ')')
            .unwrap_or(s.len());
        return Some((Inline::Link(s[..end].to_string()), end));
    }

    None
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders nodes as HTML with every payload escaped.
pub fn to_html(nodes: &[Inline]) -> String {
    let mut html = String::new();
    for node in nodes {
        match node {
            Inline::Text(s) => html.push_str(&escape_html(s)),
            Inline::Strong(s) => {
                html.push_str(&format!("<strong>{}</strong>", escape_html(s)));
            }
            Inline::Emphasis(s) => html.push_str(&format!("<em>{}</em>", escape_html(s))),
            Inline::Code(s) => html.push_str(&format!("<code>{}</code>", escape_html(s))),
            Inline::Link(url) => {
                let url = escape_html(url);
                html.push_str(&format!(
                    "<a href=\"{url}\" target=\"_blank\" rel=\"noreferrer\">{url}</a>"
                ));
            }
        }
    }
    html
}
