//! HTML fragment output

use super::registry::{FormatError, Formatter};
use crate::rml::transpile::{Document, TranspileOptions, Transpiler};

pub struct HtmlFormatter {
    transpiler: Transpiler,
}

impl HtmlFormatter {
    pub fn new(options: TranspileOptions) -> Self {
        HtmlFormatter {
            transpiler: Transpiler::with_options(options),
        }
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new(TranspileOptions::default())
    }
}

impl Formatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(self.transpiler.render(doc))
    }

    fn description(&self) -> &str {
        "HTML fragment, with a <style> block when styles are supplied"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_with_stylesheet() {
        let doc = Transpiler::new().parse_document_with_styles("{text}x{.text}", "[color: red;]");
        let out = HtmlFormatter::default().serialize(&doc).unwrap();
        assert_eq!(out, "<style>\nbody {\n  color: #ff0000;\n}\n</style>\n<p>x</p>");
    }

    #[test]
    fn test_escaping_follows_options() {
        let doc = Transpiler::new().parse_document("{text}1 < 2{.text}");
        let formatter = HtmlFormatter::new(TranspileOptions {
            escape_text: true,
            ..TranspileOptions::default()
        });
        assert_eq!(formatter.serialize(&doc).unwrap(), "<p>1 &lt; 2</p>");
    }
}
