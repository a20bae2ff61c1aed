//! Pipeline output types

use serde::{Deserialize, Serialize};

use crate::pass::PassId;
use crate::style::StyleApplication;

/// Non-fatal condition recorded while a run completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The pass the condition is attached to
    pub pass: PassId,
    /// What happened
    pub kind: DiagnosticKind,
    /// Human-readable detail
    pub detail: String,
}

/// Kinds of non-fatal run conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// An iterate-to-fixpoint pass hit its iteration bound while still
    /// changing its output; the last produced text was kept
    NonConvergence,
    /// The run was cancelled before this pass started
    Cancelled,
}

/// Result of one pipeline run over one text segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// The corrected text, with every protective marker decoded away
    pub text: String,
    /// Style intents over `text`, ordered by span start
    pub spans: Vec<StyleApplication>,
    /// Conditions the caller may want to surface
    pub diagnostics: Vec<Diagnostic>,
}

impl Correction {
    /// Whether the run finished without recording any diagnostic
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Whether the run was cut short by cancellation
    pub fn was_cancelled(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Cancelled)
    }

    /// Whether the corrected text differs from `original`
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}
