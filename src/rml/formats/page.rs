//! Standalone HTML5 page output

use super::registry::{FormatError, Formatter};
use crate::rml::transpile::{Document, ParseNode, TranspileOptions, Transpiler};

/// Presentation for the classes generated by the educational and layout tags
pub const DEFAULT_STYLESHEET: &str = r#".rml-warning {
  background-color: #fff3cd;
  border-left: 4px solid #ffc107;
  padding: 12px 16px;
  margin: 12px 0;
}
.rml-error {
  background-color: #f8d7da;
  border-left: 4px solid #dc3545;
  padding: 12px 16px;
  margin: 12px 0;
}
.rml-success {
  background-color: #d4edda;
  border-left: 4px solid #28a745;
  padding: 12px 16px;
  margin: 12px 0;
}
.rml-info {
  background-color: #d1ecf1;
  border-left: 4px solid #17a2b8;
  padding: 12px 16px;
  margin: 12px 0;
}
.rml-card {
  border: 1px solid #dddddd;
  border-radius: 8px;
  padding: 16px;
  margin: 12px 0;
  box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
}
.rml-exercise {
  background-color: #f8f9fa;
  border: 2px dashed #6c757d;
  padding: 16px;
  margin: 12px 0;
}
.rml-question {
  font-weight: 600;
  margin: 12px 0 4px;
}
.rml-answer {
  color: #155724;
  margin: 4px 0 12px;
}
.rml-lesson {
  padding: 16px;
  margin: 16px 0;
}
.rml-tip {
  background-color: #e7f5ff;
  border-left: 4px solid #339af0;
  padding: 12px 16px;
  margin: 12px 0;
}
.rml-note {
  background-color: #f1f3f5;
  border-left: 4px solid #868e96;
  padding: 12px 16px;
  margin: 12px 0;
}
"#;

const DEFAULT_TITLE: &str = "RML Document";

pub struct PageFormatter {
    transpiler: Transpiler,
    include_default_styles: bool,
}

impl PageFormatter {
    pub fn new(options: TranspileOptions, include_default_styles: bool) -> Self {
        PageFormatter {
            transpiler: Transpiler::with_options(options),
            include_default_styles,
        }
    }
}

impl Default for PageFormatter {
    fn default() -> Self {
        Self::new(TranspileOptions::default(), true)
    }
}

impl Formatter for PageFormatter {
    fn name(&self) -> &str {
        "page"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let mut page = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", escape_title(&page_title(doc))));
        if self.include_default_styles {
            page.push_str("<style>\n");
            page.push_str(DEFAULT_STYLESHEET);
            page.push_str("</style>\n");
        }
        page.push_str("</head>\n<body>\n");
        page.push_str(&self.transpiler.render(doc));
        page.push_str("\n</body>\n</html>\n");
        Ok(page)
    }

    fn description(&self) -> &str {
        "Standalone HTML5 document with the default class styles"
    }
}

/// Text of the first top-level heading
fn page_title(doc: &Document) -> String {
    doc.find_element("h1")
        .map(|heading| {
            heading
                .children
                .iter()
                .map(ParseNode::plain_text)
                .collect::<String>()
        })
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

fn escape_title(title: &str) -> String {
    title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
