//! Special element handlers
//!
//! Images, links and media read their attributes out of the content region instead of
//! wrapping it:
//!
//!     {image}src="cat.png" alt="A cat" width="200"{.image}
//!     {link}href="https://example.com" target="_blank" Visit us{.link}
//!     {video}src="clip.mp4" Your browser cannot play this video{.video}
//!
//! Each handler returns the extracted attributes and the part of the content that is still
//! rendered as children (link label, media fallback text). Images keep no content.

use crate::rml::tags::SpecialHandler;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SRC: Lazy<Regex> = Lazy::new(|| Regex::new(r#"src="([^"]+)""#).unwrap());
static ALT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"alt="([^"]+)""#).unwrap());
static WIDTH: Lazy<Regex> = Lazy::new(|| Regex::new(r#"width="([^"]+)""#).unwrap());
static HEIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"height="([^"]+)""#).unwrap());
static HREF_AND_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)href="([^"]+)"\s*(.*)"#).unwrap());
static TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r#"target="([^"]*)""#).unwrap());

/// An attribute produced by a handler; `value: None` is a boolean attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerAttribute {
    pub name: &'static str,
    pub value: Option<String>,
}

impl HandlerAttribute {
    fn valued(name: &'static str, value: impl Into<String>) -> Self {
        HandlerAttribute {
            name,
            value: Some(value.into()),
        }
    }

    fn flag(name: &'static str) -> Self {
        HandlerAttribute { name, value: None }
    }
}

/// Output of a handler over one content region
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Extracted<'a> {
    pub attributes: Vec<HandlerAttribute>,
    /// Content still rendered as children
    pub body: std::borrow::Cow<'a, str>,
}

pub(crate) fn extract(handler: SpecialHandler, content: &str) -> Extracted<'_> {
    match handler {
        SpecialHandler::None => Extracted {
            attributes: Vec::new(),
            body: content.into(),
        },
        SpecialHandler::Image => image(content),
        SpecialHandler::Link => link(content),
        SpecialHandler::Video | SpecialHandler::Audio => media(content),
    }
}

fn first_capture(pattern: &Regex, content: &str) -> Option<String> {
    pattern.captures(content).map(|caps| caps[1].to_string())
}

fn image(content: &str) -> Extracted<'_> {
    let mut attributes = vec![
        HandlerAttribute::valued("src", first_capture(&SRC, content).unwrap_or_default()),
        HandlerAttribute::valued("alt", first_capture(&ALT, content).unwrap_or_default()),
    ];
    if let Some(width) = first_capture(&WIDTH, content) {
        attributes.push(HandlerAttribute::valued("width", width));
    }
    if let Some(height) = first_capture(&HEIGHT, content) {
        attributes.push(HandlerAttribute::valued("height", height));
    }
    Extracted {
        attributes,
        body: "".into(),
    }
}

fn link(content: &str) -> Extracted<'_> {
    let Some(caps) = HREF_AND_LABEL.captures(content) else {
        return Extracted {
            attributes: Vec::new(),
            body: content.into(),
        };
    };

    let mut attributes = vec![HandlerAttribute::valued("href", &caps[1])];
    if let Some(target) = first_capture(&TARGET, content).filter(|t| !t.is_empty()) {
        attributes.push(HandlerAttribute::valued("target", target));
    }
    let label = TARGET.replace(&caps[2], "").trim().to_string();
    Extracted {
        attributes,
        body: label.into(),
    }
}

fn media(content: &str) -> Extracted<'_> {
    let src = first_capture(&SRC, content).unwrap_or_default();
    let fallback = SRC.replace(content, "").trim().to_string();
    Extracted {
        attributes: vec![
            HandlerAttribute::flag("controls"),
            HandlerAttribute::valued("src", src),
        ],
        body: fallback.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(extracted: &'a Extracted<'_>) -> Vec<(&'static str, Option<&'a str>)> {
        extracted
            .attributes
            .iter()
            .map(|a| (a.name, a.value.as_deref()))
            .collect()
    }

    #[test]
    fn test_image_attributes() {
        let ex = extract(
            SpecialHandler::Image,
            r#"src="cat.png" alt="A cat" height="40""#,
        );
        assert_eq!(
            names(&ex),
            vec![
                ("src", Some("cat.png")),
                ("alt", Some("A cat")),
                ("height", Some("40"))
            ]
        );
        assert_eq!(ex.body, "");
    }

    #[test]
    fn test_image_without_attributes() {
        let ex = extract(SpecialHandler::Image, "just words");
        assert_eq!(names(&ex), vec![("src", Some("")), ("alt", Some(""))]);
    }

    #[test]
    fn test_link_with_target() {
        let ex = extract(
            SpecialHandler::Link,
            r#"href="https://example.com" target="_blank" Visit us"#,
        );
        assert_eq!(
            names(&ex),
            vec![
                ("href", Some("https://example.com")),
                ("target", Some("_blank"))
            ]
        );
        assert_eq!(ex.body, "Visit us");
    }

    #[test]
    fn test_link_without_href() {
        let ex = extract(SpecialHandler::Link, "nowhere");
        assert!(ex.attributes.is_empty());
        assert_eq!(ex.body, "nowhere");
    }

    #[test]
    fn test_media_fallback() {
        let ex = extract(
            SpecialHandler::Video,
            r#"src="clip.mp4" No video support"#,
        );
        assert_eq!(
            names(&ex),
            vec![("controls", None), ("src", Some("clip.mp4"))]
        );
        assert_eq!(ex.body, "No video support");
    }
}
