//! Parse tree
//!
//! Built once per parse and consumed by rendering. A tagged node's children come from its
//! own content region only.

use super::handlers::HandlerAttribute;
use crate::rml::styling::Stylesheet;
use crate::rml::tags::ResolvedTag;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParseNode {
    Text { text: String },
    Tagged(TaggedNode),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedNode {
    /// Name as written in the source
    pub name: String,
    pub rule: ResolvedTag,
    /// Literal attribute text of `{name attrs}`, copied verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
    /// Resolved inline RSS, ready for a `style` attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_style: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub handler_attributes: Vec<HandlerAttribute>,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub fn text(text: impl Into<String>) -> Self {
        ParseNode::Text { text: text.into() }
    }

    /// Concatenated text of this node and its descendants
    pub fn plain_text(&self) -> String {
        match self {
            ParseNode::Text { text } => text.clone(),
            ParseNode::Tagged(node) => node.children.iter().map(ParseNode::plain_text).collect(),
        }
    }
}

/// A parsed RML document with its optional generated stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub nodes: Vec<ParseNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<Stylesheet>,
}

impl Document {
    /// Depth-first search for the first node rendered as `element`
    pub fn find_element(&self, element: &str) -> Option<&TaggedNode> {
        fn walk<'a>(nodes: &'a [ParseNode], element: &str) -> Option<&'a TaggedNode> {
            nodes.iter().find_map(|node| match node {
                ParseNode::Tagged(tagged) if tagged.rule.html_element() == element => Some(tagged),
                ParseNode::Tagged(tagged) => walk(&tagged.children, element),
                ParseNode::Text { .. } => None,
            })
        }
        walk(&self.nodes, element)
    }
}
