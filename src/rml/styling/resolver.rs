//! Declaration resolution
//!
//!     Turns the inside of an RSS bracket, `property: value; property: value;`, into CSS
//!     declarations:
//!
//!         - declarations are split on `;` and trimmed; empty ones are skipped
//!         - the property is looked up case-insensitively; unknown properties are dropped
//!         - the value is looked up in the property's value group (or every group, in order,
//!           when the property has none); unknown keywords pass through literally
//!         - spacing and radius properties get `px` appended to a bare number
//!
//!     Resolution is a pure function of the input and the alias tables.

use super::aliases::{StyleAliasTables, StyleProperty, ValueGroup};
use serde::Serialize;
use std::fmt;

/// A resolved CSS declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

/// Resolve a declaration list against the global alias tables
pub fn resolve_declarations(source: &str) -> Vec<Declaration> {
    resolve_with(StyleAliasTables::global(), source)
}

pub(crate) fn resolve_with(tables: &StyleAliasTables, source: &str) -> Vec<Declaration> {
    source
        .split(';')
        .filter_map(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            let (name, value) = raw.split_once(':')?;
            let (name, value) = (name.trim(), value.trim());
            if name.is_empty() || value.is_empty() {
                return None;
            }
            let Some(property) = tables.property(name) else {
                log::debug!("dropping unknown RSS property '{}'", name);
                return None;
            };
            Some(Declaration {
                property: property.css_property,
                value: resolve_value(tables, property, value),
            })
        })
        .collect()
}

fn resolve_value(tables: &StyleAliasTables, property: &StyleProperty, value: &str) -> String {
    if property.rss_name == "flex" && value.eq_ignore_ascii_case("yes") {
        return "flex".to_string();
    }

    let groups = match property.value_group() {
        Some(group) => vec![group],
        None => ValueGroup::ALL.to_vec(),
    };
    if let Some(literal) = groups
        .into_iter()
        .find_map(|group| tables.value(group, value))
    {
        return literal.to_string();
    }

    if property.infers_unit() && is_bare_number(value) {
        return format!("{}px", value);
    }
    value.to_string()
}

/// Digits with at most one decimal point, nothing else
fn is_bare_number(value: &str) -> bool {
    let mut digits = 0;
    let mut points = 0;
    for c in value.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}

/// Inline form for a `style` attribute: `color: #ff0000; font-size: 24px;`
pub fn to_inline_style(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
