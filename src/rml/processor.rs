//! File processing API
//!
//! Ties the transpiler, the stylesheet generator and the format registry together for
//! callers working with files, the `rml` binary chief among them.
//!
//! ```rust,ignore
//! use rml::rml::processor::{process_file, ProcessingSpec};
//!
//! let spec = ProcessingSpec::new("page");
//! let html = process_file("lesson.rml", Some("lesson.rss"), &spec)?;
//! ```

use crate::rml::config::RmlConfig;
use crate::rml::formats::{FormatError, FormatRegistry};
use crate::rml::reverse::html_to_rml;
use crate::rml::styling::generate_stylesheet;
use crate::rml::transpile::{TranspileOptions, Transpiler};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to produce from an RML source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub format: String,
    pub options: TranspileOptions,
    pub include_default_styles: bool,
}

impl ProcessingSpec {
    pub fn new(format: impl Into<String>) -> Self {
        ProcessingSpec {
            format: format.into(),
            options: TranspileOptions::default(),
            include_default_styles: true,
        }
    }

    pub fn from_config(config: &RmlConfig) -> Self {
        ProcessingSpec {
            format: config.output.format.clone(),
            options: config.transpile.clone(),
            include_default_styles: config.output.include_default_styles,
        }
    }
}

/// Transpile RML source, with optional block-form RSS, into the requested format
pub fn process_str(
    source: &str,
    styles: Option<&str>,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    let registry = FormatRegistry::with_options(spec.options.clone(), spec.include_default_styles);
    if !registry.has(&spec.format) {
        return Err(FormatError::FormatNotFound(spec.format.clone()).into());
    }

    let transpiler = Transpiler::with_options(spec.options.clone());
    let doc = match styles {
        Some(rss) => transpiler.parse_document_with_styles(source, rss),
        None => transpiler.parse_document(source),
    };
    log::debug!(
        "parsed {} top-level nodes, rendering as '{}'",
        doc.nodes.len(),
        spec.format
    );
    Ok(registry.serialize(&doc, &spec.format)?)
}

/// Read an RML file (and optionally an RSS file) and produce the requested format
pub fn process_file<P: AsRef<Path>>(
    path: P,
    styles_path: Option<P>,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    let source = fs::read_to_string(path)?;
    let styles = styles_path.map(fs::read_to_string).transpose()?;
    process_str(&source, styles.as_deref(), spec)
}

/// Block-form RSS file → CSS
pub fn style_file<P: AsRef<Path>>(path: P) -> Result<String, ProcessingError> {
    let source = fs::read_to_string(path)?;
    Ok(generate_stylesheet(&source).to_string())
}

/// HTML file → RML
pub fn reverse_file<P: AsRef<Path>>(path: P) -> Result<String, ProcessingError> {
    let source = fs::read_to_string(path)?;
    Ok(html_to_rml(&source))
}

/// Names of all formats [process_str] accepts
pub fn available_formats() -> Vec<String> {
    FormatRegistry::with_defaults().list_formats()
}
