//! Stylesheet generation
//!
//!     Block-form RSS:
//!
//!         [color: blue;]
//!
//!         {title} {
//!             [color: red;]
//!             [size: huge;]
//!         }
//!
//!     Bare top-level brackets are collected under an implicit `body` rule, emitted first.
//!     Each block's selector is resolved token by token: a token naming a known tag becomes
//!     that tag's class selector (`.rml-card`) or element (`h1`); anything else is kept as
//!     written. Blocks without a single valid declaration are omitted.

use super::resolver::{resolve_with, Declaration};
use super::StyleAliasTables;
use crate::rml::tags::TagResolver;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static BRACED_TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{[A-Za-z][A-Za-z0-9]*\}").unwrap());

static BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]").unwrap());

/// Selector used for bare top-level declarations
pub const IMPLICIT_SELECTOR: &str = "body";

/// One `selector { declarations }` rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// A generated stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    pub rules: Vec<StyleRule>,
}

impl Stylesheet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{} {{", rule.selector)?;
            for declaration in &rule.declarations {
                writeln!(f, "  {}", declaration)?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

/// Generate a stylesheet from block-form RSS using the global tables
pub fn generate_stylesheet(source: &str) -> Stylesheet {
    StylesheetGenerator::new(TagResolver::global(), StyleAliasTables::global()).generate(source)
}

pub struct StylesheetGenerator<'a> {
    tags: &'a TagResolver,
    tables: &'a StyleAliasTables,
}

impl<'a> StylesheetGenerator<'a> {
    pub fn new(tags: &'a TagResolver, tables: &'a StyleAliasTables) -> Self {
        StylesheetGenerator { tags, tables }
    }

    pub fn generate(&self, source: &str) -> Stylesheet {
        let mut bare = Vec::new();
        let mut blocks = Vec::new();
        let mut pos = 0;

        loop {
            pos += leading_whitespace(&source[pos..]);
            if pos >= source.len() {
                break;
            }

            if source[pos..].starts_with('[') {
                let Some(offset) = source[pos..].find(']') else {
                    log::debug!("unterminated RSS bracket at byte {}", pos);
                    break;
                };
                bare.extend(resolve_with(self.tables, &source[pos + 1..pos + offset]));
                pos += offset + 1;
                continue;
            }

            let Some(open) = find_block_open(source, pos) else {
                log::debug!("ignoring trailing RSS text at byte {}", pos);
                break;
            };
            let Some(close_offset) = source[open + 1..].find('}') else {
                log::debug!("unterminated RSS block at byte {}", open);
                break;
            };
            let close = open + 1 + close_offset;

            let declarations: Vec<Declaration> = BRACKET
                .captures_iter(&source[open + 1..close])
                .flat_map(|caps| resolve_with(self.tables, &caps[1]))
                .collect();
            blocks.push(StyleRule {
                selector: self.resolve_selector(&source[pos..open]),
                declarations,
            });
            pos = close + 1;
        }

        let mut rules = Vec::with_capacity(blocks.len() + 1);
        if !bare.is_empty() {
            rules.push(StyleRule {
                selector: IMPLICIT_SELECTOR.to_string(),
                declarations: bare,
            });
        }
        rules.extend(blocks.into_iter().filter(|rule| !rule.declarations.is_empty()));
        Stylesheet { rules }
    }

    /// Translate RML tag names in a selector into their CSS selectors
    pub fn resolve_selector(&self, selector: &str) -> String {
        let cleaned: String = selector.chars().filter(|c| *c != '{' && *c != '}').collect();
        let resolved = cleaned
            .split(',')
            .map(|part| {
                part.split_whitespace()
                    .map(|token| match self.tags.lookup(token) {
                        Some(rule) if is_identifier(token) => rule.selector(),
                        _ => token.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        if resolved.is_empty() {
            IMPLICIT_SELECTOR.to_string()
        } else {
            resolved
        }
    }
}

fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Find the `{` opening a block body, stepping over `{name}` selectors
fn find_block_open(source: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let open = pos + source[pos..].find('{')?;
        match BRACED_TAG_NAME.find(&source[open..]) {
            Some(m) => pos = open + m.end(),
            None => return Some(open),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_declarations_go_to_body() {
        let css = generate_stylesheet("[color: blue;]\n[size: large;]").to_string();
        assert_eq!(css, "body {\n  color: #0000ff;\n  font-size: 24px;\n}\n");
    }

    #[test]
    fn test_blocks_with_tag_selectors() {
        let source = "{title} {\n    [color: red;]\n    [size: huge;]\n}\n\ncard {\n    [rounded: 10;]\n}";
        let css = generate_stylesheet(source).to_string();
        assert_eq!(
            css,
            "h1 {\n  color: #ff0000;\n  font-size: 32px;\n}\n\n.rml-card {\n  border-radius: 10px;\n}\n"
        );
    }

    #[test]
    fn test_unknown_selector_passes_through() {
        let css = generate_stylesheet(".fancy > p { [color: green;] }").to_string();
        assert_eq!(css, ".fancy > p {\n  color: #008000;\n}\n");
    }

    #[test]
    fn test_body_first_then_blocks() {
        let sheet = generate_stylesheet("text { [size: small;] } [color: gray;]");
        let selectors: Vec<_> = sheet.rules.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec!["body", "p"]);
    }

    #[test]
    fn test_empty_blocks_omitted() {
        let sheet = generate_stylesheet("warning { [bogus: 1;] }");
        assert!(sheet.is_empty());
        assert_eq!(sheet.to_string(), "");
    }

    #[test]
    fn test_selector_lists() {
        let generator = StylesheetGenerator::new(TagResolver::global(), StyleAliasTables::global());
        assert_eq!(generator.resolve_selector("title, subtitle"), "h1, h2");
        assert_eq!(generator.resolve_selector("{card} title"), ".rml-card h1");
        assert_eq!(generator.resolve_selector("customthing"), "customthing");
        assert_eq!(generator.resolve_selector("  "), "body");
    }

    #[test]
    fn test_unterminated_input_is_not_an_error() {
        let sheet = generate_stylesheet("[color: red;] title { [size: huge;]");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selector, "body");
    }
}
