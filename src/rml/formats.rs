//! Output formats for parsed documents
//!
//! - html: the HTML fragment, prefixed by a `<style>` block when styles were supplied
//! - page: a standalone HTML5 document
//! - tree: the parse tree as pretty-printed JSON

pub mod html;
pub mod page;
pub mod registry;
pub mod tree;

pub use html::HtmlFormatter;
pub use page::{PageFormatter, DEFAULT_STYLESHEET};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use tree::TreeFormatter;
