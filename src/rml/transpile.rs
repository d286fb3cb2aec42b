//! RML → HTML transpilation
//!
//!     The engine works in two passes over one top-level input:
//!
//!     1. Shortcuts are expanded once (see [crate::rml::shortcuts]).
//!     2. The text is scanned for tag spans, building a [Document] tree. Each opener binds
//!        to the nearest closer with the same name; the content in between is parsed on its
//!        own, so siblings never see each other's text. Openers without a closer are left as
//!        literal text and scanning resumes just after their `{`.
//!
//!     Rendering the tree is a separate step (see [render]), which lets callers ask for
//!     the tree itself (the `tree` output format) or render it with different options.
//!
//!     Nesting is bounded by [TranspileOptions::max_depth]; spans opened deeper than that
//!     are emitted as literal text.

pub mod handlers;
pub mod node;
mod render;
mod scanner;

pub use handlers::HandlerAttribute;
pub use node::{Document, ParseNode, TaggedNode};

use crate::rml::shortcuts;
use crate::rml::styling::{generate_stylesheet, resolve_declarations, to_inline_style};
use crate::rml::tags::TagResolver;
use log::{debug, warn};
use scanner::Opener;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Knobs for a [Transpiler]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspileOptions {
    /// Run the shortcut expander before scanning
    pub expand_shortcuts: bool,
    /// HTML-escape literal text, handler-extracted attribute values and inline styles
    pub escape_text: bool,
    /// Deepest tag nesting that is still transpiled
    pub max_depth: usize,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        TranspileOptions {
            expand_shortcuts: true,
            escape_text: false,
            max_depth: 64,
        }
    }
}

pub struct Transpiler {
    tags: &'static TagResolver,
    options: TranspileOptions,
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transpiler {
    pub fn new() -> Self {
        Self::with_options(TranspileOptions::default())
    }

    pub fn with_options(options: TranspileOptions) -> Self {
        Transpiler {
            tags: TagResolver::global(),
            options,
        }
    }

    pub fn options(&self) -> &TranspileOptions {
        &self.options
    }

    /// Parse RML text into a tree without rendering it
    pub fn parse_document(&self, text: &str) -> Document {
        let source = if self.options.expand_shortcuts {
            shortcuts::expand(text)
        } else {
            Cow::Borrowed(text)
        };
        Document {
            nodes: self.build_nodes(&source, 0),
            stylesheet: None,
        }
    }

    /// Parse RML text and attach the stylesheet generated from block-form RSS
    pub fn parse_document_with_styles(&self, rml: &str, rss: &str) -> Document {
        let mut doc = self.parse_document(rml);
        doc.stylesheet = Some(generate_stylesheet(rss));
        doc
    }

    pub fn render(&self, doc: &Document) -> String {
        render::render_document(doc, &self.options)
    }

    /// RML text → HTML fragment
    pub fn parse(&self, text: &str) -> String {
        self.render(&self.parse_document(text))
    }

    /// RML text → HTML fragment, prefixed by a `<style>` block generated from `rss`
    pub fn parse_with_styles(&self, rml: &str, rss: &str) -> String {
        self.render(&self.parse_document_with_styles(rml, rss))
    }

    fn build_nodes(&self, text: &str, depth: usize) -> Vec<ParseNode> {
        let mut nodes = Vec::new();
        let mut literal_start = 0;
        let mut search = 0;

        while let Some(opener) = scanner::next_opener(text, search) {
            let Some(closer) = scanner::matching_closer(text, opener.content_start, opener.name)
            else {
                debug!(
                    "no closer for '{{{}}}' at byte {}, left literal",
                    opener.name, opener.start
                );
                search = opener.start + 1;
                continue;
            };

            if depth >= self.options.max_depth {
                warn!(
                    "'{{{}}}' is nested deeper than {} levels, emitted as text",
                    opener.name, self.options.max_depth
                );
                search = closer.end;
                continue;
            }

            push_text(&mut nodes, &text[literal_start..opener.start]);
            let content = &text[opener.content_start..closer.start];
            nodes.push(ParseNode::Tagged(self.build_tagged(&opener, content, depth)));
            literal_start = closer.end;
            search = closer.end;
        }

        push_text(&mut nodes, &text[literal_start..]);
        nodes
    }

    fn build_tagged(&self, opener: &Opener<'_>, content: &str, depth: usize) -> TaggedNode {
        let rule = self.tags.resolve(opener.name);
        let inline_style = opener
            .style_block
            .map(|block| to_inline_style(&resolve_declarations(block)))
            .filter(|style| !style.is_empty());
        let extracted = handlers::extract(rule.special(), content);
        let children = self.build_nodes(&extracted.body, depth + 1);

        TaggedNode {
            name: opener.name.to_string(),
            rule,
            attributes: opener.attributes.map(str::to_string),
            inline_style,
            handler_attributes: extracted.attributes,
            children,
        }
    }
}

/// Append literal text, merging with a preceding text node
fn push_text(nodes: &mut Vec<ParseNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(ParseNode::Text { text: last }) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(ParseNode::text(text));
    }
}

/// Transpile with default options (raw output, shortcuts expanded)
pub fn parse(text: &str) -> String {
    Transpiler::new().parse(text)
}

/// Absent input yields an empty fragment
pub fn parse_optional(text: Option<&str>) -> String {
    text.map(parse).unwrap_or_default()
}

/// Whether `text` holds at least one complete `{name}…{.name}` span
pub fn contains_rml(text: &str) -> bool {
    let mut search = 0;
    while let Some(opener) = scanner::next_opener(text, search) {
        if scanner::matching_closer(text, opener.content_start, opener.name).is_some() {
            return true;
        }
        search = opener.start + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transpiler(options: TranspileOptions) -> Transpiler {
        Transpiler::with_options(options)
    }

    #[test]
    fn test_plain_and_classed_tags() {
        assert_eq!(parse("{title}Hi{.title}"), "<h1>Hi</h1>");
        assert_eq!(
            parse("{success}Done{.success}"),
            r#"<div class="rml-success">Done</div>"#
        );
    }

    #[test]
    fn test_nested_tags() {
        assert_eq!(
            parse("{card}{title}Hi{.title}{.card}"),
            r#"<div class="rml-card"><h1>Hi</h1></div>"#
        );
    }

    #[test]
    fn test_closer_name_is_case_insensitive() {
        assert_eq!(parse("{Title}Hi{.TITLE}"), "<h1>Hi</h1>");
    }

    #[test]
    fn test_mismatched_closer_is_literal() {
        assert_eq!(parse("{title}Hello{.subtitle}"), "{title}Hello{.subtitle}");
    }

    #[test]
    fn test_unmatched_opener_keeps_later_spans() {
        assert_eq!(
            parse("{note} then {bold}b{.bold}"),
            "{note} then <strong>b</strong>"
        );
    }

    #[test]
    fn test_siblings_do_not_mix() {
        assert_eq!(
            parse("{bold}a{.bold}-{italic}b{.italic}"),
            "<strong>a</strong>-<em>b</em>"
        );
    }

    #[test]
    fn test_unknown_tag_keeps_name() {
        assert_eq!(
            parse("{customthing}x{.customthing}"),
            r#"<div data-rml-tag="customthing">x</div>"#
        );
    }

    #[test]
    fn test_literal_attributes() {
        assert_eq!(
            parse(r#"{box id="main"}x{.box}"#),
            r#"<div id="main">x</div>"#
        );
        assert_eq!(
            parse(r#"{card class="wide"}x{.card}"#),
            r#"<div class="wide rml-card">x</div>"#
        );
    }

    #[test]
    fn test_inline_style() {
        assert_eq!(
            parse("{text}[color: red; radius: 4;]hi{.text}"),
            r#"<p style="color: #ff0000; border-radius: 4px;">hi</p>"#
        );
    }

    #[test]
    fn test_inline_style_with_only_unknown_properties_is_dropped() {
        assert_eq!(parse("{text}[bogus: 1;]hi{.text}"), "<p>hi</p>");
    }

    #[test]
    fn test_image_is_void() {
        assert_eq!(
            parse(r#"{image}src="a.png" alt="A"{.image}"#),
            r#"<img src="a.png" alt="A">"#
        );
    }

    #[test]
    fn test_link_label_is_parsed() {
        assert_eq!(
            parse(r#"{link}href="/x" target="_blank" **go**{.link}"#),
            r#"<a href="/x" target="_blank"><strong>go</strong></a>"#
        );
    }

    #[test]
    fn test_video_fallback() {
        assert_eq!(
            parse(r#"{video}src="v.mp4" no video{.video}"#),
            r#"<video controls src="v.mp4">no video</video>"#
        );
    }

    #[test]
    fn test_shortcuts_toggle() {
        assert_eq!(parse("**b**"), "<strong>b</strong>");
        assert_eq!(parse("***x***"), "<strong><em>x</em></strong>");
        let raw = transpiler(TranspileOptions {
            expand_shortcuts: false,
            ..TranspileOptions::default()
        });
        assert_eq!(raw.parse("**b**"), "**b**");
    }

    #[test]
    fn test_depth_limit_emits_literal() {
        let shallow = transpiler(TranspileOptions {
            max_depth: 1,
            ..TranspileOptions::default()
        });
        assert_eq!(
            shallow.parse("{card}{bold}x{.bold}{.card}"),
            r#"<div class="rml-card">{bold}x{.bold}</div>"#
        );
    }

    #[test]
    fn test_escape_mode() {
        let escaping = transpiler(TranspileOptions {
            escape_text: true,
            ..TranspileOptions::default()
        });
        assert_eq!(
            escaping.parse("{text}a < b & c{.text}"),
            "<p>a &lt; b &amp; c</p>"
        );
        assert_eq!(parse("{text}a < b{.text}"), "<p>a < b</p>");
    }

    #[test]
    fn test_escape_mode_covers_inline_style() {
        let escaping = transpiler(TranspileOptions {
            escape_text: true,
            ..TranspileOptions::default()
        });
        assert_eq!(
            escaping.parse(r#"{box}[font: a" onclick="alert(1)]x{.box}"#),
            r#"<div style="font-family: a&quot; onclick=&quot;alert(1);">x</div>"#
        );
    }

    #[test]
    fn test_opener_with_trailing_space() {
        assert_eq!(parse("{box }x{.box}"), "<div>x</div>");
    }

    #[test]
    fn test_parse_with_styles() {
        let html =
            Transpiler::new().parse_with_styles("{title}T{.title}", "title { [color: blue;] }");
        assert_eq!(
            html,
            "<style>\nh1 {\n  color: #0000ff;\n}\n</style>\n<h1>T</h1>"
        );
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional(None), "");
        assert_eq!(parse_optional(Some("{bold}b{.bold}")), "<strong>b</strong>");
    }

    #[test]
    fn test_contains_rml() {
        assert!(contains_rml("intro {note} {bold}b{.bold}"));
        assert!(!contains_rml("{title}Hello{.subtitle}"));
        assert!(!contains_rml("plain text"));
    }

    #[test]
    fn test_document_tree() {
        let doc = Transpiler::new().parse_document("a{card}{title}Hi{.title}{.card}");
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[0], ParseNode::text("a"));
        let title = doc.find_element("h1").unwrap();
        assert_eq!(title.name, "title");
        assert_eq!(title.children, vec![ParseNode::text("Hi")]);
    }
}
