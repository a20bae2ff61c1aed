//! Output formatting module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use typographe_core::{Correction, Diagnostic, StyleRole, StyleRoleMap};

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// One corrected document, as reported to the user
#[derive(Debug, Serialize, Deserialize)]
pub struct FileReport {
    /// Input path, `-` for stdin
    pub file: String,
    /// Whether correction changed the text
    pub changed: bool,
    /// The corrected text
    pub text: String,
    /// Style spans over `text`
    pub spans: Vec<SpanReport>,
    /// Non-fatal conditions recorded by the pipeline
    pub diagnostics: Vec<Diagnostic>,
}

/// One style span, resolved against the configured style names
#[derive(Debug, Serialize, Deserialize)]
pub struct SpanReport {
    /// Byte offsets into the corrected text
    pub start: usize,
    pub end: usize,
    /// The formatting intent the engine attached
    pub role: StyleRole,
    /// Host style from the configuration's `[styles]` map, when mapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl FileReport {
    /// Builds the report for one document
    pub fn new(
        file: String,
        original: &str,
        correction: Correction,
        styles: &StyleRoleMap,
    ) -> Self {
        let spans = correction
            .spans
            .iter()
            .map(|app| SpanReport {
                start: app.span.start,
                end: app.span.end,
                role: app.role,
                style: styles.get(&app.role).cloned(),
            })
            .collect();
        Self {
            file,
            changed: correction.changed(original),
            text: correction.text,
            spans,
            diagnostics: correction.diagnostics,
        }
    }
}

/// Trait for report writers
pub trait OutputFormatter {
    /// Consumes one document's report
    fn write_report(&mut self, report: FileReport) -> Result<()>;

    /// Finalizes the output stream
    fn finish(&mut self) -> Result<()>;
}
