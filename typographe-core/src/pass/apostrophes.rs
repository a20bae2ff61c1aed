//! Apostrophe pass
//!
//! A straight quote flanked by letters is an elision or contraction and
//! becomes the typographic apostrophe. Straight quotes at word edges stay
//! untouched unless the profile lists the token as always-apostrophe
//! ("qu'", "'tis"): an edge quote may equally be a closing single quote,
//! and a wrong guess there is worse than a missed correction.

use regex::Regex;

use crate::pass::{alternation, compile, next_char, prev_char, Pass, PassCx};
use crate::profile::LanguageProfile;
use crate::rewrite::Rewriter;

pub(crate) struct ApostrophePass {
    apostrophe: String,
    ambiguous_re: Option<Regex>,
}

impl ApostrophePass {
    pub(crate) fn new(profile: &LanguageProfile) -> Self {
        let ambiguous_re = if profile.words.ambiguous.is_empty() {
            None
        } else {
            Some(compile(&format!(
                "(?i:{})",
                alternation(&profile.words.ambiguous)
            )))
        };
        Self {
            apostrophe: profile.quotes.apostrophe.clone(),
            ambiguous_re,
        }
    }

    fn convert_between_letters(&self, text: &str) -> (String, Vec<crate::rewrite::Edit>) {
        let mut rw = Rewriter::new(text);
        for (idx, _) in text.match_indices('\'') {
            let prev_is_letter = prev_char(text, idx).is_some_and(char::is_alphabetic);
            let next_is_letter = next_char(text, idx + 1).is_some_and(char::is_alphabetic);
            if prev_is_letter && next_is_letter {
                rw.replace(idx..idx + 1, &self.apostrophe);
            }
        }
        rw.finish()
    }

    fn convert_listed_tokens(&self, text: &str) -> (String, Vec<crate::rewrite::Edit>) {
        let Some(re) = &self.ambiguous_re else {
            return (text.to_string(), Vec::new());
        };
        let mut rw = Rewriter::new(text);
        for m in re.find_iter(text) {
            if prev_char(text, m.start()).is_some_and(char::is_alphabetic) {
                continue;
            }
            // Entries ending in the quote are elision stems and may be
            // followed by anything; full tokens must end at a word edge.
            if !m.as_str().ends_with('\'')
                && next_char(text, m.end()).is_some_and(char::is_alphabetic)
            {
                continue;
            }
            for (offset, _) in m.as_str().match_indices('\'') {
                let at = m.start() + offset;
                rw.replace(at..at + 1, &self.apostrophe);
            }
        }
        rw.finish()
    }
}

impl Pass for ApostrophePass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let (current, edits) = self.convert_between_letters(text);
        crate::rewrite::remap_applications(&edits, cx.spans);

        let (current, edits) = self.convert_listed_tokens(&current);
        crate::rewrite::remap_applications(&edits, cx.spans);
        current
    }
}
