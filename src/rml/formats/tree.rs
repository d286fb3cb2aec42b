//! Parse tree as JSON

use super::registry::{FormatError, Formatter};
use crate::rml::transpile::Document;

pub struct TreeFormatter;

impl Formatter for TreeFormatter {
    fn name(&self) -> &str {
        "tree"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Parse tree as pretty-printed JSON"
    }
}
