//! RSS alias tables
//!
//! Property names map onto CSS properties; value keywords map onto CSS literals. Value
//! keywords are split into groups so that a keyword used by more than one group resolves by
//! context: `[size: normal;]` is `16px`, `[weight: normal;]` is `400`.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Conceptual group of a value keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueGroup {
    Color,
    Size,
    Alignment,
    Weight,
    Display,
}

impl ValueGroup {
    /// Search order for properties without a group of their own
    pub const ALL: [ValueGroup; 5] = [
        ValueGroup::Color,
        ValueGroup::Size,
        ValueGroup::Alignment,
        ValueGroup::Weight,
        ValueGroup::Display,
    ];
}

/// RSS property name → CSS property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleProperty {
    pub rss_name: &'static str,
    pub css_property: &'static str,
}

impl StyleProperty {
    /// The value group keywords are looked up in, or `None` to search every group
    pub fn value_group(&self) -> Option<ValueGroup> {
        match self.css_property {
            "color" | "background-color" | "border-color" => Some(ValueGroup::Color),
            "font-size" | "width" | "height" => Some(ValueGroup::Size),
            "text-align" => Some(ValueGroup::Alignment),
            "font-weight" => Some(ValueGroup::Weight),
            "display" => Some(ValueGroup::Display),
            _ => None,
        }
    }

    /// Spacing and radius properties get `px` appended to bare numbers
    pub fn infers_unit(&self) -> bool {
        matches!(self.css_property, "margin" | "padding" | "border-radius")
    }
}

/// Value keyword → CSS literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleValueAlias {
    pub keyword: &'static str,
    pub css_literal: &'static str,
    pub group: ValueGroup,
}

macro_rules! properties {
    ($($rss:literal => $css:literal),* $(,)?) => {
        &[$(StyleProperty { rss_name: $rss, css_property: $css }),*]
    };
}

macro_rules! values {
    ($group:expr; $($keyword:literal => $literal:literal),* $(,)?) => {
        &[$(StyleValueAlias { keyword: $keyword, css_literal: $literal, group: $group }),*]
    };
}

const PROPERTIES: &[StyleProperty] = properties! {
    // Colors
    "color" => "color",
    "textcolor" => "color",
    "background" => "background-color",
    "bg" => "background-color",
    "bgcolor" => "background-color",
    "backgroundcolor" => "background-color",
    // Sizes
    "size" => "font-size",
    "textsize" => "font-size",
    "fontsize" => "font-size",
    "width" => "width",
    "height" => "height",
    // Spacing
    "margin" => "margin",
    "padding" => "padding",
    "space" => "margin",
    "outerspace" => "margin",
    "innerspace" => "padding",
    // Text
    "font" => "font-family",
    "fontfamily" => "font-family",
    "weight" => "font-weight",
    "fontweight" => "font-weight",
    "style" => "font-style",
    "fontstyle" => "font-style",
    "align" => "text-align",
    "textalign" => "text-align",
    "decoration" => "text-decoration",
    "textdecoration" => "text-decoration",
    "transform" => "text-transform",
    "spacing" => "letter-spacing",
    "lineheight" => "line-height",
    // Layout
    "display" => "display",
    "position" => "position",
    "float" => "float",
    "clear" => "clear",
    "overflow" => "overflow",
    // Border
    "border" => "border",
    "bordercolor" => "border-color",
    "borderwidth" => "border-width",
    "borderstyle" => "border-style",
    "radius" => "border-radius",
    "borderradius" => "border-radius",
    "rounded" => "border-radius",
    // Shadow and effects
    "shadow" => "box-shadow",
    "textshadow" => "text-shadow",
    "opacity" => "opacity",
    "transparent" => "opacity",
    // Flexbox
    "flex" => "display",
    "direction" => "flex-direction",
    "wrap" => "flex-wrap",
    "justify" => "justify-content",
    "items" => "align-items",
    "content" => "align-content",
};

const COLORS: &[StyleValueAlias] = values! { ValueGroup::Color;
    "red" => "#ff0000",
    "blue" => "#0000ff",
    "green" => "#008000",
    "yellow" => "#ffff00",
    "purple" => "#800080",
    "orange" => "#ffa500",
    "pink" => "#ffc0cb",
    "black" => "#000000",
    "white" => "#ffffff",
    "gray" => "#808080",
    "grey" => "#808080",
    "lightblue" => "#add8e6",
    "lightgreen" => "#90ee90",
    "lightyellow" => "#ffffe0",
    "darkblue" => "#00008b",
    "darkgreen" => "#006400",
    "darkred" => "#8b0000",
};

const SIZES: &[StyleValueAlias] = values! { ValueGroup::Size;
    "tiny" => "10px",
    "small" => "12px",
    "normal" => "16px",
    "medium" => "18px",
    "large" => "24px",
    "huge" => "32px",
    "giant" => "48px",
};

const ALIGNMENTS: &[StyleValueAlias] = values! { ValueGroup::Alignment;
    "left" => "left",
    "center" => "center",
    "right" => "right",
    "middle" => "center",
};

const WEIGHTS: &[StyleValueAlias] = values! { ValueGroup::Weight;
    "thin" => "100",
    "light" => "300",
    "normal" => "400",
    "bold" => "700",
    "thick" => "900",
};

const DISPLAYS: &[StyleValueAlias] = values! { ValueGroup::Display;
    "show" => "block",
    "hide" => "none",
    "flex" => "flex",
    "inline" => "inline",
    "block" => "block",
};

static GLOBAL: Lazy<StyleAliasTables> = Lazy::new(StyleAliasTables::build);

/// Read-only property and value tables
pub struct StyleAliasTables {
    properties: HashMap<&'static str, &'static StyleProperty>,
    values: HashMap<ValueGroup, HashMap<&'static str, &'static str>>,
}

impl StyleAliasTables {
    fn build() -> Self {
        let properties = PROPERTIES.iter().map(|p| (p.rss_name, p)).collect();
        let mut values: HashMap<ValueGroup, HashMap<&'static str, &'static str>> = HashMap::new();
        for alias in [COLORS, SIZES, ALIGNMENTS, WEIGHTS, DISPLAYS].into_iter().flatten() {
            values
                .entry(alias.group)
                .or_default()
                .insert(alias.keyword, alias.css_literal);
        }
        StyleAliasTables { properties, values }
    }

    /// The process-wide tables, built on first use
    pub fn global() -> &'static StyleAliasTables {
        &GLOBAL
    }

    /// Look up an RSS property name, case-insensitively
    pub fn property(&self, rss_name: &str) -> Option<&'static StyleProperty> {
        self.properties
            .get(rss_name.to_ascii_lowercase().as_str())
            .copied()
    }

    /// Look up a value keyword within one group, case-insensitively
    pub fn value(&self, group: ValueGroup, keyword: &str) -> Option<&'static str> {
        self.values
            .get(&group)?
            .get(keyword.to_ascii_lowercase().as_str())
            .copied()
    }
}

/// All RSS property names, sorted
pub fn available_properties() -> Vec<&'static str> {
    let mut names: Vec<_> = PROPERTIES.iter().map(|p| p.rss_name).collect();
    names.sort_unstable();
    names
}

/// All value keywords, sorted and deduplicated across groups
pub fn available_values() -> Vec<&'static str> {
    let mut names: Vec<_> = [COLORS, SIZES, ALIGNMENTS, WEIGHTS, DISPLAYS]
        .into_iter()
        .flatten()
        .map(|alias| alias.keyword)
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}
