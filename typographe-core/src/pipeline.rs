//! Correction pipeline
//!
//! Feeds text through the enabled passes in registry order. Each pass
//! receives the previous pass's output, so the registry rank decides every
//! rule interaction once, globally. Iterate-to-fixpoint passes run under a
//! [`LoopGuard`]; hitting the bound downgrades to a diagnostic instead of
//! spinning. Cancellation is observed between passes only, and the text
//! returned is always fully decoded, never a half-marked intermediate.

use crate::cancel::CancelToken;
use crate::error::PipelineError;
use crate::guard::{GuardState, LoopGuard};
use crate::marker::MarkerCodec;
use crate::output::{Correction, Diagnostic, DiagnosticKind};
use crate::pass::{instantiate, registry, Convergence, PassCx, PassId, PassSpec};
use crate::profile::LanguageProfile;
use crate::rewrite::remap_applications;
use crate::style::StyleApplication;

/// Runs the enabled passes over one text segment.
///
/// The pipeline itself is stateless between runs; every invocation builds
/// its own marker table, so segments may be processed in parallel by
/// handing each its own profile reference.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    /// Overrides the per-pass iteration bound when set
    max_iterations: Option<usize>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps every iterate-to-fixpoint pass at `max` iterations
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Corrects `text` under `profile`, running the passes listed in
    /// `enabled` that the profile makes applicable.
    ///
    /// Spans in the returned [`Correction`] are byte ranges into its final
    /// text, sorted by position. A cancelled run returns everything
    /// produced so far plus a [`DiagnosticKind::Cancelled`] diagnostic.
    pub fn run(
        &self,
        text: &str,
        profile: &LanguageProfile,
        enabled: &[PassId],
        cancel: Option<&CancelToken>,
    ) -> Result<Correction, PipelineError> {
        let mut codec = MarkerCodec::for_text(text);
        let mut current = text.to_string();
        let mut spans: Vec<StyleApplication> = Vec::new();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        for spec in registry() {
            if !enabled.contains(&spec.id) || !(spec.applies)(profile) {
                continue;
            }
            if cancel.is_some_and(CancelToken::is_cancelled) {
                diagnostics.push(Diagnostic {
                    pass: spec.id,
                    kind: DiagnosticKind::Cancelled,
                    detail: format!("run cancelled before the {} pass", spec.id),
                });
                break;
            }
            current = self.run_pass(spec, current, profile, &mut codec, &mut spans, &mut diagnostics);
        }

        let (decoded, edits) = if codec.is_empty() {
            (current, Vec::new())
        } else {
            codec.decode_tracked(&current)?
        };
        remap_applications(&edits, &mut spans);
        spans.sort_by_key(|app| (app.span.start, app.span.end));
        spans.dedup();
        Ok(Correction {
            text: decoded,
            spans,
            diagnostics,
        })
    }

    fn run_pass(
        &self,
        spec: &PassSpec,
        mut current: String,
        profile: &LanguageProfile,
        codec: &mut MarkerCodec,
        spans: &mut Vec<StyleApplication>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> String {
        let pass = instantiate(spec.id, profile);
        match spec.convergence {
            Convergence::Single => {
                let mut cx = PassCx { codec, spans };
                pass.apply(&current, &mut cx)
            }
            Convergence::IterateToFixpoint => {
                let bound = self.max_iterations.unwrap_or(spec.max_iterations);
                let mut guard = LoopGuard::new(bound);
                loop {
                    let mut cx = PassCx { codec, spans };
                    let next = pass.apply(&current, &mut cx);
                    match guard.observe(&current, &next) {
                        GuardState::Running => current = next,
                        GuardState::Converged => break,
                        GuardState::MaxIterationsExceeded => {
                            current = next;
                            diagnostics.push(Diagnostic {
                                pass: spec.id,
                                kind: DiagnosticKind::NonConvergence,
                                detail: format!(
                                    "output still changing after {} iterations",
                                    guard.iterations()
                                ),
                            });
                            break;
                        }
                    }
                }
                current
            }
        }
    }
}
