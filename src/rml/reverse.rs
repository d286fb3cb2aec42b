//! HTML → RML, best effort
//!
//! The reverse index maps each HTML element to one RML name. The forward table is
//! many-to-one, so on collision the rule registered last wins (`h1` → `title`, `div` →
//! `div`). Elements carrying `data-rml-tag` get their original name back.
//!
//! Only the tag name and the literal attribute text survive; generated classes and inline
//! styles are kept as plain attributes, never turned back into RSS. Closers bind to the
//! nearest `</element>` of the same name, mirroring the forward engine, so same-name
//! nesting does not survive either.
//!
//! Nesting is bounded like the forward engine: an element opened at the depth limit is
//! copied through as HTML.

use crate::rml::tags::{SpecialHandler, TagResolver, TagRule, FALLBACK_ATTRIBUTE};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static HTML_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9]*)(\s[^>]*)?>").unwrap());

static HTML_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</([A-Za-z][A-Za-z0-9]*)\s*>").unwrap());

static FALLBACK_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\s*{}="([^"]*)""#, regex::escape(FALLBACK_ATTRIBUTE))).unwrap()
});

static GLOBAL: Lazy<ReverseTranspiler> =
    Lazy::new(|| ReverseTranspiler::from_resolver(TagResolver::global()));

/// Convert an HTML fragment into RML using the global tag table
pub fn html_to_rml(html: &str) -> String {
    ReverseTranspiler::global().to_rml(html)
}

/// Deepest element nesting converted by default
pub const DEFAULT_MAX_DEPTH: usize = 64;

pub struct ReverseTranspiler {
    by_element: HashMap<&'static str, &'static TagRule>,
    max_depth: usize,
}

impl ReverseTranspiler {
    pub fn from_resolver(tags: &TagResolver) -> Self {
        let mut by_element = HashMap::new();
        for rule in tags.rules() {
            by_element.insert(rule.html_element, rule);
        }
        ReverseTranspiler {
            by_element,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn global() -> &'static ReverseTranspiler {
        &GLOBAL
    }

    /// The RML name an element converts back to, if the table knows the element
    pub fn rml_name(&self, element: &str) -> Option<&'static str> {
        self.rule_for(element).map(|rule| rule.rml_name)
    }

    fn rule_for(&self, element: &str) -> Option<&'static TagRule> {
        self.by_element
            .get(element.to_ascii_lowercase().as_str())
            .copied()
    }

    pub fn to_rml(&self, html: &str) -> String {
        self.convert(html, 0)
    }

    fn convert(&self, html: &str, depth: usize) -> String {
        let mut out = String::with_capacity(html.len());
        let mut literal_start = 0;
        let mut search = 0;

        while let Some(caps) = HTML_OPEN.captures_at(html, search) {
            let (Some(marker), Some(element)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let element = element.as_str();
            let attributes = caps
                .get(2)
                .map(|m| m.as_str().trim().trim_end_matches('/').trim_end())
                .unwrap_or("");
            let rule = self.rule_for(element);

            match find_closer(html, marker.end(), element) {
                Some((_, close_end)) if depth >= self.max_depth => {
                    log::warn!(
                        "<{}> is nested deeper than {} levels, kept as HTML",
                        element,
                        self.max_depth
                    );
                    search = close_end;
                }
                Some((close_start, close_end)) => {
                    out.push_str(&html[literal_start..marker.start()]);
                    let inner = self.convert(&html[marker.end()..close_start], depth + 1);
                    out.push_str(&span(element, rule, attributes, &inner));
                    literal_start = close_end;
                    search = close_end;
                }
                None if rule.map(|r| r.special) == Some(SpecialHandler::Image) => {
                    out.push_str(&html[literal_start..marker.start()]);
                    out.push_str(&span(element, rule, attributes, ""));
                    literal_start = marker.end();
                    search = marker.end();
                }
                None => {
                    log::debug!("no closer for <{}> at byte {}", element, marker.start());
                    search = marker.start() + 1;
                }
            }
        }

        out.push_str(&html[literal_start..]);
        out
    }
}

fn find_closer(html: &str, from: usize, element: &str) -> Option<(usize, usize)> {
    HTML_CLOSE
        .captures_iter(&html[from..])
        .find(|caps| caps[1].eq_ignore_ascii_case(element))
        .and_then(|caps| caps.get(0))
        .map(|m| (from + m.start(), from + m.end()))
}

/// One converted element. Special elements move their attributes back into the content
/// region, where the forward handlers read them from.
fn span(element: &str, rule: Option<&TagRule>, attributes: &str, inner: &str) -> String {
    let (name, special, attributes) = match FALLBACK_NAME.captures(attributes) {
        Some(caps) => (
            caps[1].to_string(),
            SpecialHandler::None,
            FALLBACK_NAME.replace(attributes, "").trim().to_string(),
        ),
        None => (
            rule.map(|r| r.rml_name.to_string())
                .unwrap_or_else(|| element.to_ascii_lowercase()),
            rule.map(|r| r.special).unwrap_or(SpecialHandler::None),
            attributes.to_string(),
        ),
    };

    match special {
        SpecialHandler::None if attributes.is_empty() => {
            format!("{{{}}}{}{{.{}}}", name, inner, name)
        }
        SpecialHandler::None => format!("{{{} {}}}{}{{.{}}}", name, attributes, inner, name),
        SpecialHandler::Image | SpecialHandler::Link => {
            format!("{{{}}}{}{{.{}}}", name, join_content(&attributes, inner), name)
        }
        SpecialHandler::Video | SpecialHandler::Audio => {
            let attributes = attributes
                .split_whitespace()
                .filter(|attr| *attr != "controls")
                .collect::<Vec<_>>()
                .join(" ");
            format!("{{{}}}{}{{.{}}}", name, join_content(&attributes, inner), name)
        }
    }
}

fn join_content(attributes: &str, inner: &str) -> String {
    match (attributes.is_empty(), inner.is_empty()) {
        (true, _) => inner.to_string(),
        (false, true) => attributes.to_string(),
        (false, false) => format!("{} {}", attributes, inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rml::transpile::parse;

    #[test]
    fn test_last_registered_name_wins() {
        let reverse = ReverseTranspiler::global();
        assert_eq!(reverse.rml_name("h1"), Some("title"));
        assert_eq!(reverse.rml_name("div"), Some("div"));
        assert_eq!(reverse.rml_name("A"), Some("link"));
        assert_eq!(reverse.rml_name("blink"), None);
    }

    #[test]
    fn test_nested_elements() {
        assert_eq!(
            html_to_rml("<section><h1>Hi</h1><p>text</p></section>"),
            "{section}{title}Hi{.title}{text}text{.text}{.section}"
        );
    }

    #[test]
    fn test_attributes_are_kept() {
        assert_eq!(
            html_to_rml(r#"<div class="rml-card" id="a">x</div>"#),
            r#"{div class="rml-card" id="a"}x{.div}"#
        );
    }

    #[test]
    fn test_fallback_name_is_recovered() {
        let html = parse("{customthing}x{.customthing}");
        assert_eq!(html_to_rml(&html), "{customthing}x{.customthing}");
    }

    #[test]
    fn test_special_elements_round_trip() {
        for rml in [
            r#"{image}src="a.png" alt="A"{.image}"#,
            r#"{link}href="/x" target="_blank" go{.link}"#,
            r#"{video}src="v.mp4" no video{.video}"#,
        ] {
            assert_eq!(html_to_rml(&parse(rml)), rml);
        }
    }

    #[test]
    fn test_self_closing_image() {
        assert_eq!(
            html_to_rml(r#"<img src="a.png" alt="" />"#),
            r#"{image}src="a.png" alt=""{.image}"#
        );
    }

    #[test]
    fn test_depth_limit_keeps_html() {
        let shallow = ReverseTranspiler::from_resolver(TagResolver::global()).with_max_depth(1);
        assert_eq!(
            shallow.to_rml("<div><p><b>x</b></p></div>a<section>y</section>"),
            "{div}<p><b>x</b></p>{.div}a{section}y{.section}"
        );
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let levels = 5000;
        let mut html = String::new();
        for level in 0..levels {
            html.push_str(&format!("<x{}>", level));
        }
        html.push_str("core");
        for level in (0..levels).rev() {
            html.push_str(&format!("</x{}>", level));
        }

        let rml = html_to_rml(&html);
        assert!(rml.starts_with("{x0}{x1}"));
        assert!(rml.contains("core"));
        assert!(rml.contains(&format!("<x{}>", DEFAULT_MAX_DEPTH)));
        assert!(!rml.contains(&format!("{{x{}}}", DEFAULT_MAX_DEPTH)));
    }

    #[test]
    fn test_unclosed_and_unknown_elements() {
        assert_eq!(html_to_rml("a <br> b"), "a <br> b");
        assert_eq!(html_to_rml("<blink>x</blink>"), "{blink}x{.blink}");
        assert_eq!(html_to_rml("plain text"), "plain text");
    }
}
