//! Straight double quote pass
//!
//! Straight double quotes pair up left to right; each full pair becomes the
//! profile's first-level quote glyphs with the profile's inner spacing. An
//! unpaired trailing quote stays as typed, and a pair whose content crosses
//! a paragraph break is treated as unpaired rather than silently spanning
//! half the document.

use crate::pass::{is_space_like, Pass, PassCx};
use crate::profile::LanguageProfile;
use crate::rewrite::Rewriter;

pub(crate) struct QuotePass {
    open: String,
    close: String,
    inner: &'static str,
}

impl QuotePass {
    pub(crate) fn new(profile: &LanguageProfile) -> Self {
        // Validation guarantees at least one level.
        let level = &profile.quotes.levels[0];
        Self {
            open: level.open.clone(),
            close: level.close.clone(),
            inner: profile.quotes.inner_space.glyph(),
        }
    }
}

impl Pass for QuotePass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let positions: Vec<usize> = text.match_indices('"').map(|(idx, _)| idx).collect();
        if positions.len() < 2 {
            return text.to_string();
        }

        let mut rw = Rewriter::new(text);
        for pair in positions.chunks_exact(2) {
            let (open_at, close_at) = (pair[0], pair[1]);
            if text[open_at..close_at].contains("\n\n") {
                continue;
            }

            // The opening glyph absorbs any spaces already typed inside.
            let mut content_start = open_at + 1;
            while content_start < close_at {
                match text[content_start..].chars().next() {
                    Some(c) if is_space_like(c) => content_start += c.len_utf8(),
                    _ => break,
                }
            }
            rw.replace(
                open_at..content_start,
                &format!("{}{}", self.open, self.inner),
            );

            let mut content_end = close_at;
            while content_end > content_start {
                match text[..content_end].chars().next_back() {
                    Some(c) if is_space_like(c) => content_end -= c.len_utf8(),
                    _ => break,
                }
            }
            rw.replace(
                content_end..close_at + 1,
                &format!("{}{}", self.inner, self.close),
            );
        }
        rw.finish_remap(cx.spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerCodec;
    use crate::profile::builtin;

    fn run(profile_id: &str, text: &str) -> String {
        let profile = builtin(profile_id).unwrap();
        let pass = QuotePass::new(profile);
        let mut codec = MarkerCodec::for_text(text);
        let mut spans = Vec::new();
        let mut cx = PassCx {
            codec: &mut codec,
            spans: &mut spans,
        };
        pass.apply(text, &mut cx)
    }

    #[test]
    fn test_french_pair_becomes_guillemets_with_nbsp() {
        assert_eq!(
            run("fr-FR", "Il dit \"bonjour\" fort"),
            "Il dit «\u{a0}bonjour\u{a0}» fort"
        );
    }

    #[test]
    fn test_typed_inner_spaces_are_absorbed() {
        assert_eq!(run("fr-FR", "\" déjà \""), "«\u{a0}déjà\u{a0}»");
    }

    #[test]
    fn test_english_pair_has_no_inner_space() {
        assert_eq!(run("en-US", "He said \"stop\" now"), "He said “stop” now");
    }

    #[test]
    fn test_unpaired_quote_is_untouched() {
        assert_eq!(run("fr-FR", "say \"hi"), "say \"hi");
        assert_eq!(
            run("fr-FR", "un \"mot\" et \"reste"),
            "un «\u{a0}mot\u{a0}» et \"reste"
        );
    }

    #[test]
    fn test_pair_across_paragraph_break_is_left_alone() {
        assert_eq!(run("fr-FR", "\"un\n\ndeux\""), "\"un\n\ndeux\"");
    }

    #[test]
    fn test_successive_pairs_each_convert() {
        assert_eq!(
            run("en-US", "\"one\" and \"two\""),
            "“one” and “two”"
        );
    }

    #[test]
    fn test_empty_pair_converts_cleanly() {
        assert_eq!(run("en-US", "empty \"\" here"), "empty “” here");
    }

    #[test]
    fn test_second_application_is_identity() {
        let once = run("fr-FR", "Il dit \"bonjour\" fort");
        assert_eq!(run("fr-FR", &once), once);
    }
}
