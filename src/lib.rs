//! # rml
//!
//! A transpiler for RML, a brace-delimited markup language (`{tag}content{.tag}`), and
//! RSS, its bracket-delimited styling companion (`[property: value;]`).
//!
//! File Layout
//!
//! src/rml
//!   ├── tags         Tag table: RML name → HTML element, class and special handler
//!   ├── styling      Alias tables, declaration resolver and stylesheet generator
//!   ├── shortcuts    Markdown-like shortcuts rewritten into tag spans
//!   ├── transpile    Scanner, tree building, special handlers and rendering
//!   ├── reverse      Best-effort HTML → RML
//!   ├── formats      Output format registry (html, page, tree)
//!   ├── config       Layered configuration
//!   └── processor    File processing used by the `rml` binary
//!
//! The common entry points are re-exported here:
//!
//! ```rust,ignore
//! let html = rml::parse("{card}{title}Hi{.title}{.card}");
//! assert_eq!(html, r#"<div class="rml-card"><h1>Hi</h1></div>"#);
//! ```

pub mod rml;

pub use rml::reverse::html_to_rml;
pub use rml::styling::{generate_stylesheet, resolve_declarations};
pub use rml::transpile::{contains_rml, parse, parse_optional, TranspileOptions, Transpiler};
