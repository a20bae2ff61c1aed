//! Incise dash pass
//!
//! Only dashes with space on both sides are incise candidates: hyphens in
//! compounds, ranges, and line-leading dialogue dashes never match. Hyphen
//! runs (`--`, `---`) always normalize to the incise glyph; a real em dash
//! is rewritten only when the profile demotes it.

use regex::Regex;

use crate::pass::{compile, prev_char, Pass, PassCx};
use crate::profile::{DashSpacing, LanguageProfile};
use crate::rewrite::Rewriter;

pub(crate) struct DashPass {
    incise: String,
    spacing: DashSpacing,
    demote_cadratin: bool,
    candidate_re: Regex,
}

impl DashPass {
    pub(crate) fn new(profile: &LanguageProfile) -> Self {
        Self {
            incise: profile.dashes.incise.clone(),
            spacing: profile.dashes.spacing,
            demote_cadratin: profile.dashes.demote_cadratin,
            candidate_re: compile(
                "([ \\t\\u{A0}\\u{202F}]+)(--+|\u{2014}|\u{2013})([ \\t\\u{A0}\\u{202F}]+)",
            ),
        }
    }

    fn target_glyph<'a>(&'a self, dash: &'a str) -> &'a str {
        if dash == "\u{2014}" && !self.demote_cadratin {
            dash
        } else {
            &self.incise
        }
    }
}

impl Pass for DashPass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let mut rw = Rewriter::new(text);
        for caps in self.candidate_re.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let dash = caps.get(2).map(|m| m.as_str()).unwrap_or("");

            // Dialogue dashes open a line; their leading newline is not a
            // space, so only mid-line spaced dashes arrive here.
            if matches!(prev_char(text, whole.start), None | Some('\n') | Some('\r')) {
                continue;
            }
            // An existing en dash only counts as an incise when the profile
            // writes spaced en dash incises itself.
            if dash == "\u{2013}" && self.incise != "\u{2013}" {
                continue;
            }

            let glyph = self.target_glyph(dash);
            let replacement = match self.spacing {
                DashSpacing::Surround => format!(" {glyph} "),
                DashSpacing::Tight => glyph.to_string(),
            };
            rw.replace(whole, &replacement);
        }
        rw.finish_remap(cx.spans)
    }
}
