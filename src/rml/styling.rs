//! RSS styling
//!
//!     RSS is the bracket-declaration styling companion of RML: `[property: value;]`.
//!
//!     - [aliases]: read-only property and value keyword tables
//!     - [resolver]: a declaration list → CSS declarations (inline `style` use)
//!     - [stylesheet]: block-form documents → a CSS stylesheet

pub mod aliases;
pub mod resolver;
pub mod stylesheet;

pub use aliases::{available_properties, available_values, StyleAliasTables, ValueGroup};
pub use resolver::{resolve_declarations, to_inline_style, Declaration};
pub use stylesheet::{generate_stylesheet, StyleRule, Stylesheet, StylesheetGenerator};
