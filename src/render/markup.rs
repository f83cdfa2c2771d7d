//! Parsing of text block markup into styled spans.

use crate::error::{Error, Result};
use crate::layout::unescape_markup;

/// A run of text sharing one set of inline styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Unescaped text
    pub text: String,
    /// Inside `<b>`
    pub bold: bool,
    /// Inside `<i>`
    pub italic: bool,
    /// Inside `<u>`
    pub underline: bool,
}

#[derive(Default)]
struct TagDepth {
    bold: u32,
    italic: u32,
    underline: u32,
}

impl TagDepth {
    fn counter(&mut self, tag: &str) -> Option<&mut u32> {
        match tag {
            "b" => Some(&mut self.bold),
            "i" => Some(&mut self.italic),
            "u" => Some(&mut self.underline),
            _ => None,
        }
    }
}

/// Split markup into spans.
///
/// Understands nested `<b>`, `<i>` and `<u>` tags and the `&amp;`, `&lt;`,
/// `&gt;` entities. Unknown or unbalanced tags are rejected.
pub fn parse_markup(markup: &str) -> Result<Vec<Span>> {
    let mut spans: Vec<Span> = Vec::new();
    let mut depth = TagDepth::default();
    let mut rest = markup;

    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) => {
                let end = rest.find('>').ok_or_else(|| malformed(markup, "unterminated tag"))?;
                let tag = &rest[1..end];
                let (closing, name) = match tag.strip_prefix('/') {
                    Some(name) => (true, name),
                    None => (false, tag),
                };
                let counter = depth
                    .counter(name)
                    .ok_or_else(|| malformed(markup, &format!("unknown tag <{}>", tag)))?;
                if closing {
                    *counter = counter
                        .checked_sub(1)
                        .ok_or_else(|| malformed(markup, &format!("unmatched </{}>", name)))?;
                } else {
                    *counter += 1;
                }
                rest = &rest[end + 1..];
            }
            next => {
                let end = next.unwrap_or(rest.len());
                push_text(&mut spans, &depth, &rest[..end]);
                rest = &rest[end..];
            }
        }
    }

    if depth.bold + depth.italic + depth.underline > 0 {
        return Err(malformed(markup, "unclosed tag"));
    }

    Ok(spans)
}

fn push_text(spans: &mut Vec<Span>, depth: &TagDepth, raw: &str) {
    let text = unescape_markup(raw);
    let bold = depth.bold > 0;
    let italic = depth.italic > 0;
    let underline = depth.underline > 0;

    if let Some(last) = spans.last_mut() {
        if last.bold == bold && last.italic == italic && last.underline == underline {
            last.text.push_str(&text);
            return;
        }
    }
    spans.push(Span {
        text,
        bold,
        italic,
        underline,
    });
}

fn malformed(markup: &str, reason: &str) -> Error {
    Error::Translation(format!("malformed block markup ({}): {:?}", reason, markup))
}
