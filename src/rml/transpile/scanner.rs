//! Tag marker scanning
//!
//! Openers are `{name}`, `{name attrs}`, or `{name}[rss]` (inline styling and literal
//! attributes do not combine). Closers are `{.name}`. Names start with an ASCII letter and
//! continue alphanumerically; they are compared case-insensitively.

use once_cell::sync::Lazy;
use regex::Regex;

static OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z][A-Za-z0-9]*)(?:\s+([^}]*))?\}").unwrap());

static CLOSER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\.([A-Za-z][A-Za-z0-9]*)\}").unwrap());

static INLINE_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\]]+)\]").unwrap());

/// An opening marker found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Opener<'a> {
    /// Byte offset of `{`
    pub start: usize,
    /// Byte offset where the content region begins (after any inline style block)
    pub content_start: usize,
    pub name: &'a str,
    pub attributes: Option<&'a str>,
    /// Inside of the `[...]` directly following a bare opener
    pub style_block: Option<&'a str>,
}

/// A closing marker found in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Closer {
    pub start: usize,
    pub end: usize,
}

/// The first opener at or after `from`
pub(crate) fn next_opener(text: &str, from: usize) -> Option<Opener<'_>> {
    let caps = OPENER.captures_at(text, from)?;
    let marker = caps.get(0)?;
    let name = caps.get(1)?.as_str();
    let attributes = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|attrs| !attrs.is_empty());

    let mut content_start = marker.end();
    let mut style_block = None;
    if attributes.is_none() {
        if let Some(style) = INLINE_STYLE.captures(&text[content_start..]) {
            let (whole, inner) = (style.get(0)?, style.get(1)?);
            if inner.as_str().contains(':') {
                style_block = Some(inner.as_str());
                content_start += whole.end();
            }
        }
    }

    Some(Opener {
        start: marker.start(),
        content_start,
        name,
        attributes,
        style_block,
    })
}

/// The nearest closer at or after `from` carrying `name`
pub(crate) fn matching_closer(text: &str, from: usize, name: &str) -> Option<Closer> {
    CLOSER
        .captures_iter(&text[from..])
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(0))
        .map(|m| Closer {
            start: from + m.start(),
            end: from + m.end(),
        })
}
