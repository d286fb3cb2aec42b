//! HTML rendering of the parse tree
//!
//! Attribute order on an emitted element: handler attributes, the fallback
//! `data-rml-tag`, literal attributes (with the generated class merged into any literal
//! `class`), the generated class when there were no literal attributes, then `style`.
//! A handler attribute also named in the literal attributes is left out; the literal one
//! wins.

use super::node::{Document, ParseNode, TaggedNode};
use super::TranspileOptions;
use crate::rml::tags::{SpecialHandler, FALLBACK_ATTRIBUTE};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;

static CLASS_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(^|\s)class="([^"]*)""#).unwrap());

static ATTRIBUTE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|\s)([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*"[^"]*")?"#).unwrap()
});

/// The fragment, prefixed by a `<style>` block when the document carries a stylesheet
pub(crate) fn render_document(doc: &Document, options: &TranspileOptions) -> String {
    let mut out = String::new();
    if let Some(sheet) = doc.stylesheet.as_ref().filter(|sheet| !sheet.is_empty()) {
        out.push_str("<style>\n");
        out.push_str(&sheet.to_string());
        out.push_str("</style>\n");
    }
    render_nodes(&doc.nodes, options, &mut out);
    out
}

pub(crate) fn render_nodes(nodes: &[ParseNode], options: &TranspileOptions, out: &mut String) {
    for node in nodes {
        match node {
            ParseNode::Text { text } => push_text(text, options, out),
            ParseNode::Tagged(tagged) => render_tagged(tagged, options, out),
        }
    }
}

fn render_tagged(node: &TaggedNode, options: &TranspileOptions, out: &mut String) {
    let element = node.rule.html_element();
    out.push('<');
    out.push_str(element);

    let literal_names = node
        .attributes
        .as_deref()
        .map(attribute_names)
        .unwrap_or_default();
    for attribute in &node.handler_attributes {
        if literal_names.contains(attribute.name) {
            continue;
        }
        out.push(' ');
        out.push_str(attribute.name);
        if let Some(value) = &attribute.value {
            out.push_str("=\"");
            out.push_str(&escape_if(value, options.escape_text, true));
            out.push('"');
        }
    }

    if let Some(name) = node.rule.fallback_name() {
        out.push_str(&format!(" {}=\"{}\"", FALLBACK_ATTRIBUTE, name));
    }

    match (&node.attributes, node.rule.css_class()) {
        (Some(literal), class) => {
            out.push(' ');
            out.push_str(&merge_class(literal, class));
        }
        (None, Some(class)) => out.push_str(&format!(" class=\"{}\"", class)),
        (None, None) => {}
    }

    if let Some(style) = &node.inline_style {
        out.push_str(&format!(
            " style=\"{}\"",
            escape_if(style, options.escape_text, true)
        ));
    }
    out.push('>');

    if node.rule.special() == SpecialHandler::Image {
        return;
    }

    render_nodes(&node.children, options, out);
    out.push_str("</");
    out.push_str(element);
    out.push('>');
}

/// Lower-cased names declared in literal attribute text
fn attribute_names(literal: &str) -> HashSet<String> {
    ATTRIBUTE_NAME
        .captures_iter(literal)
        .map(|caps| caps[1].to_ascii_lowercase())
        .collect()
}

/// Union of a literal `class="..."` and the generated class, never an overwrite
fn merge_class<'a>(literal: &'a str, class: Option<&str>) -> Cow<'a, str> {
    let Some(class) = class else {
        return Cow::Borrowed(literal);
    };
    match CLASS_ATTRIBUTE.captures(literal) {
        Some(caps) => {
            let existing = caps[2].trim();
            if existing.split_whitespace().any(|c| c == class) {
                return Cow::Borrowed(literal);
            }
            let merged = if existing.is_empty() {
                format!("{}class=\"{}\"", &caps[1], class)
            } else {
                format!("{}class=\"{} {}\"", &caps[1], existing, class)
            };
            CLASS_ATTRIBUTE.replace(literal, regex::NoExpand(&merged))
        }
        None => Cow::Owned(format!("{} class=\"{}\"", literal, class)),
    }
}

fn push_text(text: &str, options: &TranspileOptions, out: &mut String) {
    out.push_str(&escape_if(text, options.escape_text, false));
}

fn escape_if(text: &str, escape: bool, quotes: bool) -> Cow<'_, str> {
    if !escape || !text.contains(&['&', '<', '>', '"'][..]) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if quotes => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
