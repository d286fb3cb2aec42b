//! Tag resolution
//!
//!     Maps an RML tag name onto the HTML element it produces, an optional CSS class and an
//!     optional special handler. Lookup is case-insensitive.
//!
//!     The table is layered, in registration order:
//!
//!         - Raw element synonyms: headings, paragraphs, inline text, lists, tables, forms,
//!           media and links.
//!         - Layout containers: box, panel, card, hero, gallery, ...
//!         - Educational vocabulary: lesson, exercise, quiz, homework, tip, warning, ... Each
//!           maps onto `div`, `section` or `article` and carries its own `rml-<name>` class.
//!         - Element identities: `section`, `article`, ..., `div`.
//!
//!     Registration order matters for the reverse index used by
//!     [reverse](super::reverse): several RML names share an element and the last one
//!     registered wins. The identity layer is last, so `<div>` reverses to `{div}`.
//!
//! Unknown Tags
//!
//!     A name missing from the table resolves to a generic `div` carrying the literal name in
//!     a `data-rml-tag` attribute, which the reverse transpiler reads back.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Element emitted for tag names missing from the table
pub const FALLBACK_ELEMENT: &str = "div";

/// Attribute carrying the literal name of an unknown tag
pub const FALLBACK_ATTRIBUTE: &str = "data-rml-tag";

/// Content handlers that replace generic element wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialHandler {
    None,
    /// `src`, `alt`, `width`, `height` extracted from the content; emits a void `<img>`
    Image,
    /// `href` and `target` extracted from the content; the rest is the label
    Link,
    /// `src` extracted from the content; the rest is fallback text
    Video,
    Audio,
}

impl std::fmt::Display for SpecialHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecialHandler::None => write!(f, "none"),
            SpecialHandler::Image => write!(f, "image"),
            SpecialHandler::Link => write!(f, "link"),
            SpecialHandler::Video => write!(f, "video"),
            SpecialHandler::Audio => write!(f, "audio"),
        }
    }
}

/// A single entry of the tag table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRule {
    pub rml_name: &'static str,
    pub html_element: &'static str,
    pub css_class: Option<&'static str>,
    pub special: SpecialHandler,
}

impl TagRule {
    const fn plain(rml_name: &'static str, html_element: &'static str) -> Self {
        TagRule {
            rml_name,
            html_element,
            css_class: None,
            special: SpecialHandler::None,
        }
    }

    const fn classed(
        rml_name: &'static str,
        html_element: &'static str,
        css_class: &'static str,
    ) -> Self {
        TagRule {
            rml_name,
            html_element,
            css_class: Some(css_class),
            special: SpecialHandler::None,
        }
    }

    const fn handled(
        rml_name: &'static str,
        html_element: &'static str,
        special: SpecialHandler,
    ) -> Self {
        TagRule {
            rml_name,
            html_element,
            css_class: None,
            special,
        }
    }

    /// CSS selector addressing elements produced by this rule: the class when there is one,
    /// the bare element otherwise.
    pub fn selector(&self) -> String {
        match self.css_class {
            Some(class) => format!(".{}", class),
            None => self.html_element.to_string(),
        }
    }
}

#[rustfmt::skip]
const TAG_RULES: &[TagRule] = &[
    // Headings
    TagRule::plain("head1", "h1"),
    TagRule::plain("head2", "h2"),
    TagRule::plain("head3", "h3"),
    TagRule::plain("head4", "h4"),
    TagRule::plain("head5", "h5"),
    TagRule::plain("head6", "h6"),
    TagRule::plain("title", "h1"),
    TagRule::plain("subtitle", "h2"),
    TagRule::plain("heading", "h3"),
    TagRule::plain("subheading", "h4"),
    TagRule::plain("smalltitle", "h5"),
    TagRule::plain("tinytitle", "h6"),
    // Paragraphs
    TagRule::plain("para", "p"),
    TagRule::plain("paragraph", "p"),
    TagRule::plain("text", "p"),
    // Inline text
    TagRule::plain("bold", "strong"),
    TagRule::plain("important", "strong"),
    TagRule::plain("strong", "strong"),
    TagRule::plain("italic", "em"),
    TagRule::plain("emphasis", "em"),
    TagRule::plain("em", "em"),
    TagRule::plain("underline", "u"),
    TagRule::plain("strike", "s"),
    TagRule::plain("highlight", "mark"),
    TagRule::plain("small", "small"),
    TagRule::plain("big", "big"),
    TagRule::plain("code", "code"),
    TagRule::plain("keyboard", "kbd"),
    TagRule::plain("sample", "samp"),
    TagRule::plain("variable", "var"),
    TagRule::plain("hover", "span"),
    TagRule::plain("tooltip", "span"),
    // Lists
    TagRule::plain("bulletlist", "ul"),
    TagRule::plain("list", "ul"),
    TagRule::plain("numberlist", "ol"),
    TagRule::plain("orderedlist", "ol"),
    TagRule::plain("listitem", "li"),
    TagRule::plain("point", "li"),
    TagRule::plain("item", "li"),
    TagRule::plain("definition", "dl"),
    TagRule::plain("term", "dt"),
    TagRule::plain("description", "dd"),
    // Tables
    TagRule::plain("table", "table"),
    TagRule::plain("headerrow", "thead"),
    TagRule::plain("bodyrow", "tbody"),
    TagRule::plain("footerrow", "tfoot"),
    TagRule::plain("row", "tr"),
    TagRule::plain("column", "td"),
    TagRule::plain("cell", "td"),
    TagRule::plain("headercell", "th"),
    // Forms
    TagRule::plain("form", "form"),
    TagRule::plain("textbox", "input"),
    TagRule::plain("input", "input"),
    TagRule::plain("textarea", "textarea"),
    TagRule::plain("select", "select"),
    TagRule::plain("option", "option"),
    TagRule::plain("label", "label"),
    TagRule::plain("fieldset", "fieldset"),
    TagRule::plain("legend", "legend"),
    TagRule::plain("click", "button"),
    TagRule::plain("toggle", "button"),
    TagRule::plain("button", "button"),
    // Media
    TagRule::handled("photo", "img", SpecialHandler::Image),
    TagRule::handled("picture", "img", SpecialHandler::Image),
    TagRule::handled("image", "img", SpecialHandler::Image),
    TagRule::handled("video", "video", SpecialHandler::Video),
    TagRule::handled("audio", "audio", SpecialHandler::Audio),
    TagRule::plain("media", "figure"),
    TagRule::plain("caption", "figcaption"),
    TagRule::handled("link", "a", SpecialHandler::Link),
    // Special content
    TagRule::plain("quote", "blockquote"),
    TagRule::plain("citation", "cite"),
    TagRule::plain("address", "address"),
    TagRule::plain("date", "time"),
    TagRule::plain("time", "time"),
    TagRule::plain("progress", "progress"),
    TagRule::plain("meter", "meter"),

    // Layout containers
    TagRule::plain("container", "div"),
    TagRule::plain("box", "div"),
    TagRule::plain("content", "div"),
    TagRule::plain("wrapper", "div"),
    TagRule::plain("flex", "div"),
    TagRule::classed("panel", "div", "rml-panel"),
    TagRule::classed("card", "div", "rml-card"),
    TagRule::classed("gallery", "div", "rml-gallery"),
    TagRule::classed("grid", "div", "rml-grid"),
    TagRule::classed("slideshow", "div", "rml-slideshow"),
    TagRule::classed("carousel", "div", "rml-carousel"),
    TagRule::classed("timeline", "div", "rml-timeline"),
    TagRule::classed("chart", "div", "rml-chart"),
    TagRule::classed("graph", "div", "rml-graph"),
    TagRule::classed("diagram", "div", "rml-diagram"),
    TagRule::classed("tab", "div", "rml-tab"),
    TagRule::classed("accordion", "div", "rml-accordion"),
    TagRule::classed("dropdown", "div", "rml-dropdown"),
    TagRule::classed("modal", "div", "rml-modal"),
    TagRule::classed("popup", "div", "rml-popup"),
    TagRule::plain("sidebar", "aside"),
    TagRule::plain("navigation", "nav"),
    TagRule::plain("banner", "header"),
    TagRule::classed("hero", "header", "rml-hero"),

    // Educational: courses and lessons
    TagRule::classed("course", "section", "rml-course"),
    TagRule::classed("module", "section", "rml-module"),
    TagRule::classed("unit", "section", "rml-unit"),
    TagRule::classed("chapter", "section", "rml-chapter"),
    TagRule::classed("lesson", "section", "rml-lesson"),
    TagRule::classed("tutorial", "article", "rml-tutorial"),
    TagRule::classed("topic", "div", "rml-topic"),
    TagRule::classed("subject", "div", "rml-subject"),
    // Educational: interactive work
    TagRule::classed("question", "div", "rml-question"),
    TagRule::classed("answer", "div", "rml-answer"),
    TagRule::classed("exercise", "div", "rml-exercise"),
    TagRule::classed("activity", "div", "rml-activity"),
    TagRule::classed("task", "div", "rml-task"),
    TagRule::classed("homework", "div", "rml-homework"),
    TagRule::classed("assignment", "div", "rml-assignment"),
    TagRule::classed("project", "div", "rml-project"),
    TagRule::classed("quiz", "div", "rml-quiz"),
    TagRule::classed("test", "div", "rml-test"),
    TagRule::classed("exam", "div", "rml-exam"),
    TagRule::classed("assessment", "div", "rml-assessment"),
    // Educational: learning structure
    TagRule::classed("step", "div", "rml-step"),
    TagRule::classed("instruction", "div", "rml-instruction"),
    TagRule::classed("explanation", "div", "rml-explanation"),
    TagRule::classed("example", "div", "rml-example"),
    TagRule::classed("demonstration", "div", "rml-demonstration"),
    TagRule::classed("practice", "div", "rml-practice"),
    TagRule::classed("review", "div", "rml-review"),
    TagRule::classed("summary", "div", "rml-summary"),
    TagRule::classed("conclusion", "div", "rml-conclusion"),
    TagRule::classed("objective", "div", "rml-objective"),
    TagRule::classed("goal", "div", "rml-goal"),
    TagRule::classed("outcome", "div", "rml-outcome"),
    TagRule::classed("requirement", "div", "rml-requirement"),
    TagRule::classed("prerequisite", "div", "rml-prerequisite"),
    // Educational: messages
    TagRule::classed("success", "div", "rml-success"),
    TagRule::classed("error", "div", "rml-error"),
    TagRule::classed("warning", "div", "rml-warning"),
    TagRule::classed("info", "div", "rml-info"),
    TagRule::classed("tip", "div", "rml-tip"),
    TagRule::classed("note", "div", "rml-note"),
    TagRule::classed("alert", "div", "rml-alert"),
    TagRule::classed("notice", "div", "rml-notice"),
    TagRule::classed("caution", "div", "rml-caution"),
    TagRule::classed("reminder", "div", "rml-reminder"),
    // Educational: academic
    TagRule::classed("research", "div", "rml-research"),
    TagRule::classed("reference", "div", "rml-reference"),
    TagRule::classed("bibliography", "div", "rml-bibliography"),
    TagRule::classed("footnote", "div", "rml-footnote"),
    TagRule::classed("annotation", "div", "rml-annotation"),
    TagRule::classed("comment", "div", "rml-comment"),
    TagRule::classed("discussion", "div", "rml-discussion"),
    TagRule::classed("analysis", "div", "rml-analysis"),

    // Element identities
    TagRule::plain("section", "section"),
    TagRule::plain("article", "article"),
    TagRule::plain("header", "header"),
    TagRule::plain("footer", "footer"),
    TagRule::plain("main", "main"),
    TagRule::plain("nav", "nav"),
    TagRule::plain("aside", "aside"),
    TagRule::plain("span", "span"),
    TagRule::plain("div", "div"),
];

const TAG_DESCRIPTIONS: &[(&str, &str)] = &[
    ("title", "Main page title (biggest heading)"),
    ("subtitle", "Section title (second biggest)"),
    ("heading", "Heading for a part of a section"),
    ("text", "Regular paragraph text"),
    ("bold", "Make text bold and strong"),
    ("italic", "Make text slanted/emphasized"),
    ("code", "Show text as computer code"),
    ("quote", "A quotation from someone else"),
    ("link", "Create a clickable link"),
    ("image", "Show a picture"),
    ("video", "Play a video"),
    ("audio", "Play a sound"),
    ("list", "Create a bulleted list"),
    ("item", "One entry of a list"),
    ("card", "Create a styled box/card"),
    ("warning", "Show a warning message"),
    ("success", "Show a success message"),
    ("lesson", "Group everything that belongs to one lesson"),
    ("exercise", "Create an exercise box"),
    ("question", "Ask a question"),
    ("answer", "Provide an answer"),
];

const UNKNOWN_DESCRIPTION: &str = "Custom HTML element";

static GLOBAL: Lazy<TagResolver> = Lazy::new(|| TagResolver::from_rules(TAG_RULES));

/// Result of resolving a tag name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolvedTag {
    Known(&'static TagRule),
    /// Not in the table: rendered as [`FALLBACK_ELEMENT`] with the name preserved
    Unknown { name: String },
}

impl ResolvedTag {
    pub fn html_element(&self) -> &'static str {
        match self {
            ResolvedTag::Known(rule) => rule.html_element,
            ResolvedTag::Unknown { .. } => FALLBACK_ELEMENT,
        }
    }

    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            ResolvedTag::Known(rule) => rule.css_class,
            ResolvedTag::Unknown { .. } => None,
        }
    }

    pub fn special(&self) -> SpecialHandler {
        match self {
            ResolvedTag::Known(rule) => rule.special,
            ResolvedTag::Unknown { .. } => SpecialHandler::None,
        }
    }

    /// The literal name to carry in [`FALLBACK_ATTRIBUTE`], for unknown tags only
    pub fn fallback_name(&self) -> Option<&str> {
        match self {
            ResolvedTag::Known(_) => None,
            ResolvedTag::Unknown { name } => Some(name),
        }
    }
}

/// Immutable lookup over the tag table
pub struct TagResolver {
    rules: &'static [TagRule],
    by_name: HashMap<&'static str, &'static TagRule>,
}

impl TagResolver {
    fn from_rules(rules: &'static [TagRule]) -> Self {
        let by_name = rules.iter().map(|rule| (rule.rml_name, rule)).collect();
        TagResolver { rules, by_name }
    }

    /// The process-wide table, built on first use
    pub fn global() -> &'static TagResolver {
        &GLOBAL
    }

    /// Look up a known tag, case-insensitively
    pub fn lookup(&self, name: &str) -> Option<&'static TagRule> {
        self.by_name.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Resolve a tag name, falling back to the generic container for unknown names
    pub fn resolve(&self, name: &str) -> ResolvedTag {
        match self.lookup(name) {
            Some(rule) => ResolvedTag::Known(rule),
            None => {
                log::debug!("unknown tag '{}', using generic container", name);
                ResolvedTag::Unknown {
                    name: name.to_string(),
                }
            }
        }
    }

    /// All rules in registration order
    pub fn rules(&self) -> &'static [TagRule] {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// All known tag names, sorted
pub fn available_tags() -> Vec<&'static str> {
    let mut names: Vec<_> = TAG_RULES.iter().map(|rule| rule.rml_name).collect();
    names.sort_unstable();
    names
}

/// Human description of a tag, for listings and editor help
pub fn tag_description(name: &str) -> &'static str {
    let name = name.to_ascii_lowercase();
    TAG_DESCRIPTIONS
        .iter()
        .find(|(tag, _)| *tag == name)
        .map(|(_, description)| *description)
        .unwrap_or(UNKNOWN_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for rule in TAG_RULES {
            assert!(seen.insert(rule.rml_name), "duplicate tag {}", rule.rml_name);
            assert_eq!(rule.rml_name, rule.rml_name.to_ascii_lowercase());
        }
        assert!(TAG_RULES.len() > 100);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let resolver = TagResolver::global();
        assert_eq!(resolver.lookup("TITLE").map(|r| r.html_element), Some("h1"));
        assert_eq!(resolver.lookup("Title").map(|r| r.html_element), Some("h1"));
        assert!(resolver.lookup("nonsense").is_none());
    }

    #[test]
    fn test_educational_tags_carry_classes() {
        let resolver = TagResolver::global();
        let success = resolver.lookup("success").unwrap();
        assert_eq!(success.html_element, "div");
        assert_eq!(success.css_class, Some("rml-success"));

        let lesson = resolver.lookup("lesson").unwrap();
        assert_eq!(lesson.html_element, "section");
        assert_eq!(lesson.css_class, Some("rml-lesson"));
    }

    #[test]
    fn test_special_handlers() {
        let resolver = TagResolver::global();
        assert_eq!(resolver.resolve("image").special(), SpecialHandler::Image);
        assert_eq!(resolver.resolve("photo").special(), SpecialHandler::Image);
        assert_eq!(resolver.resolve("link").special(), SpecialHandler::Link);
        assert_eq!(resolver.resolve("video").special(), SpecialHandler::Video);
        assert_eq!(resolver.resolve("audio").special(), SpecialHandler::Audio);
        assert_eq!(resolver.resolve("text").special(), SpecialHandler::None);
    }

    #[test]
    fn test_unknown_tag_resolution() {
        let resolved = TagResolver::global().resolve("customThing");
        assert_eq!(resolved.html_element(), FALLBACK_ELEMENT);
        assert_eq!(resolved.fallback_name(), Some("customThing"));
        assert_eq!(resolved.css_class(), None);
    }

    #[test]
    fn test_selector() {
        let resolver = TagResolver::global();
        assert_eq!(resolver.lookup("card").unwrap().selector(), ".rml-card");
        assert_eq!(resolver.lookup("title").unwrap().selector(), "h1");
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(tag_description("Card"), "Create a styled box/card");
        assert_eq!(tag_description("gizmo"), "Custom HTML element");
    }

    #[test]
    fn test_available_tags_sorted() {
        let tags = available_tags();
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        assert_eq!(tags, sorted);
        assert!(tags.contains(&"quiz"));
    }
}
