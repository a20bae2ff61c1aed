//! Ordinal pass
//!
//! Normalizes ordinal suffix variants to their canonical short form and
//! marks every canonical suffix for superscript, whether or not the text
//! needed rewriting. Roman ordinals only count when a profile trigger word
//! follows ("IIe édition"); honorific titles get their tail marked without
//! any text change.

use regex::Regex;
use smallvec::SmallVec;

use crate::pass::{alternation, compile, next_char, prev_char, roman, Pass, PassCx};
use crate::profile::{LanguageProfile, OrdinalGroup};
use crate::rewrite::Rewriter;
use crate::style::{StyleApplication, StyleRole};

type SpanBuf = SmallVec<[StyleApplication; 4]>;

pub(crate) struct OrdinalPass {
    group: OrdinalGroup,
    digit_re: Option<Regex>,
    roman_re: Option<Regex>,
    title_re: Option<Regex>,
}

impl OrdinalPass {
    pub(crate) fn new(profile: &LanguageProfile) -> Self {
        let group = profile.ordinals.clone().unwrap_or(OrdinalGroup {
            enabled: false,
            suffixes: Default::default(),
            titles: Default::default(),
            triggers: Vec::new(),
        });

        let suffix_alt = if group.suffixes.is_empty() {
            None
        } else {
            let keys: Vec<String> = group.suffixes.keys().cloned().collect();
            Some(alternation(&keys))
        };

        let digit_re = suffix_alt
            .as_ref()
            .map(|alt| compile(&format!("(\\d+)({alt})")));
        let roman_re = match (&suffix_alt, group.triggers.is_empty()) {
            (Some(alt), false) => Some(compile(&format!(
                "([IVXLCDM]+)({alt})([ \\t\\u{{A0}}\\u{{202F}}]+)({})",
                alternation(&group.triggers)
            ))),
            _ => None,
        };
        let title_re = if group.titles.is_empty() {
            None
        } else {
            let keys: Vec<String> = group.titles.keys().cloned().collect();
            Some(compile(&alternation(&keys)))
        };

        Self {
            group,
            digit_re,
            roman_re,
            title_re,
        }
    }

    fn digit_scan(&self, text: &str, spans: &mut Vec<StyleApplication>) -> String {
        let Some(re) = &self.digit_re else {
            return text.to_string();
        };
        let mut new_spans = SpanBuf::new();
        let mut rw = Rewriter::new(text);
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            if prev_char(text, whole.start).is_some_and(char::is_alphanumeric)
                || next_char(text, whole.end).is_some_and(char::is_alphanumeric)
            {
                continue;
            }
            let suffix = caps.get(2).map_or(0..0, |m| m.range());
            let variant = &text[suffix.clone()];
            let Some(canonical) = self.group.suffixes.get(variant) else {
                continue;
            };
            rw.copy_to(suffix.start);
            let base = rw.out_len();
            rw.replace(suffix, canonical);
            new_spans.push(StyleApplication::new(
                base,
                base + canonical.len(),
                StyleRole::SuperscriptOrdinal,
            ));
        }
        let out = rw.finish_remap(spans);
        spans.extend(new_spans);
        out
    }

    fn roman_scan(&self, text: &str, spans: &mut Vec<StyleApplication>) -> String {
        let Some(re) = &self.roman_re else {
            return text.to_string();
        };
        let mut new_spans = SpanBuf::new();
        let mut rw = Rewriter::new(text);
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            if prev_char(text, whole.start).is_some_and(char::is_alphanumeric)
                || next_char(text, whole.end).is_some_and(char::is_alphanumeric)
            {
                continue;
            }
            let numeral = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            if roman::from_roman(numeral).is_none() {
                continue;
            }
            let suffix = caps.get(2).map_or(0..0, |m| m.range());
            let variant = &text[suffix.clone()];
            let Some(canonical) = self.group.suffixes.get(variant) else {
                continue;
            };
            rw.copy_to(suffix.start);
            let base = rw.out_len();
            rw.replace(suffix, canonical);
            new_spans.push(StyleApplication::new(
                base,
                base + canonical.len(),
                StyleRole::SuperscriptOrdinal,
            ));
            let gap = caps.get(3).map_or(0..0, |m| m.range());
            rw.replace(gap, "\u{a0}");
        }
        let out = rw.finish_remap(spans);
        spans.extend(new_spans);
        out
    }

    fn title_scan(&self, text: &str, spans: &mut Vec<StyleApplication>) -> String {
        let Some(re) = &self.title_re else {
            return text.to_string();
        };
        let mut new_spans = SpanBuf::new();
        let mut rw = Rewriter::new(text);
        for m in re.find_iter(text) {
            if prev_char(text, m.start()).is_some_and(char::is_alphanumeric)
                || next_char(text, m.end()).is_some_and(char::is_alphanumeric)
            {
                continue;
            }
            let Some(tail) = self.group.titles.get(m.as_str()) else {
                continue;
            };
            let head = m.len() - tail.len();
            rw.copy_to(m.start());
            let base = rw.out_len();
            new_spans.push(StyleApplication::new(
                base + head,
                base + m.len(),
                StyleRole::SuperscriptTitle,
            ));
        }
        let out = rw.finish_remap(spans);
        spans.extend(new_spans);
        out
    }
}

impl Pass for OrdinalPass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let current = self.digit_scan(text, cx.spans);
        let current = self.roman_scan(&current, cx.spans);
        self.title_scan(&current, cx.spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerCodec;
    use crate::profile::builtin;
    use crate::style::Span;

    fn run(profile_id: &str, text: &str) -> (String, Vec<StyleApplication>) {
        let profile = builtin(profile_id).unwrap();
        let pass = OrdinalPass::new(profile);
        let mut codec = MarkerCodec::for_text(text);
        let mut spans = Vec::new();
        let mut cx = PassCx {
            codec: &mut codec,
            spans: &mut spans,
        };
        let out = pass.apply(text, &mut cx);
        (out, spans)
    }

    #[test]
    fn test_variant_suffix_is_normalized_and_marked() {
        let (out, spans) = run("fr-FR", "la 1ère fois");
        assert_eq!(out, "la 1re fois");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].role, StyleRole::SuperscriptOrdinal);
        assert_eq!(spans[0].span, Span::new(4, 6));
        assert_eq!(&out[4..6], "re");
    }

    #[test]
    fn test_canonical_suffix_is_marked_without_rewrite() {
        let (out, spans) = run("fr-FR", "le 2e rang");
        assert_eq!(out, "le 2e rang");
        assert_eq!(spans.len(), 1);
        assert_eq!(&out[spans[0].span.start..spans[0].span.end], "e");
    }

    #[test]
    fn test_long_variants_normalize() {
        let (out, _) = run("fr-FR", "au 3ème étage, les 4èmes places");
        assert_eq!(out, "au 3e étage, les 4es places");
    }

    #[test]
    fn test_roman_ordinal_needs_a_trigger() {
        let (out, spans) = run("fr-FR", "la IIe édition");
        assert_eq!(out, "la IIe\u{a0}édition");
        assert_eq!(spans.len(), 1);
        assert_eq!(&out[spans[0].span.start..spans[0].span.end], "e");

        let (out, spans) = run("fr-FR", "la IIe partie");
        assert_eq!(out, "la IIe partie");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_invalid_roman_numeral_is_ignored() {
        let (out, spans) = run("fr-FR", "la VIIIIe édition");
        assert_eq!(out, "la VIIIIe édition");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_english_suffixes_are_marked_in_place() {
        let (out, spans) = run("en-US", "the 3rd time and the 21st mile");
        assert_eq!(out, "the 3rd time and the 21st mile");
        assert_eq!(spans.len(), 2);
        assert_eq!(&out[spans[0].span.start..spans[0].span.end], "rd");
        assert_eq!(&out[spans[1].span.start..spans[1].span.end], "st");
    }

    #[test]
    fn test_title_tail_is_marked_without_rewrite() {
        let (out, spans) = run("fr-FR", "Mme Dupont et Mlle Martin");
        assert_eq!(out, "Mme Dupont et Mlle Martin");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].role, StyleRole::SuperscriptTitle);
        assert_eq!(&out[spans[0].span.start..spans[0].span.end], "me");
        assert_eq!(&out[spans[1].span.start..spans[1].span.end], "lle");
    }

    #[test]
    fn test_embedded_digit_letter_runs_are_ignored() {
        let (out, spans) = run("fr-FR", "0x1e et 2e5");
        assert_eq!(out, "0x1e et 2e5");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_text_is_stable_under_reapplication() {
        let (once, _) = run("fr-FR", "la 1ère et la IIe édition");
        let (twice, _) = run("fr-FR", &once);
        assert_eq!(once, twice);
    }
}
