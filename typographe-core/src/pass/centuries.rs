//! Century pass
//!
//! Recognizes `numeral + ordinal suffix + century word`, normalizes the
//! numeral to the profile's system and case, canonicalizes the suffix, and
//! binds the expression together with no-break spaces. A bare number before
//! a century word ("19 siècles plus tard") is a duration and never matches:
//! the suffix is what marks the ordinal reading.
//!
//! Spans are emitted for the numeral and the suffix even when the text was
//! already canonical; renderers need the roles either way.

use regex::Regex;
use smallvec::SmallVec;

use crate::pass::{alternation, compile, next_char, prev_char, roman, Pass, PassCx};
use crate::profile::{CenturyGroup, LanguageProfile, LetterCase, NumeralStyle};
use crate::rewrite::Rewriter;
use crate::style::{StyleApplication, StyleRole};

type SpanBuf = SmallVec<[StyleApplication; 4]>;

pub(crate) struct CenturyPass {
    group: Option<CenturyGroup>,
    re: Option<Regex>,
}

impl CenturyPass {
    pub(crate) fn new(profile: &LanguageProfile) -> Self {
        let group = profile.centuries.clone();
        let re = group.as_ref().and_then(|g| {
            if g.words.is_empty() || g.suffixes.is_empty() {
                return None;
            }
            let era_tail = if g.era.is_empty() {
                String::new()
            } else {
                format!("(?:([ \\t\\u{{A0}}\\u{{202F}}]+)({}))?", alternation(&g.era))
            };
            Some(compile(&format!(
                "([IVXLCDMivxlcdm]+|\\d+)({})([ \\t\\u{{A0}}\\u{{202F}}]+)({}){}",
                alternation(&g.suffixes),
                alternation(&g.words),
                era_tail
            )))
        });
        Self { group, re }
    }

    fn numeral_value(text: &str) -> Option<u32> {
        if text.chars().all(|c| c.is_ascii_digit()) {
            text.parse().ok()
        } else {
            roman::from_roman(text)
        }
    }
}

impl Pass for CenturyPass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let (Some(group), Some(re)) = (&self.group, &self.re) else {
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

            let numeral = caps.get(1).map_or(0..0, |m| m.range());
            let Some(value) = Self::numeral_value(&text[numeral.clone()]) else {
                continue;
            };
            if value == 0 || value > 100 {
                continue;
            }

            let mut target = match group.numeral_style {
                NumeralStyle::Roman => roman::to_roman(value),
                NumeralStyle::Arabic => value.to_string(),
            };
            if group.case == LetterCase::Lower {
                target = target.to_lowercase();
            }
            rw.copy_to(numeral.start);
            let base = rw.out_len();
            rw.replace(numeral, &target);
            new_spans.push(StyleApplication::new(
                base,
                base + target.len(),
                StyleRole::CenturyNumeral,
            ));

            let suffix = caps.get(2).map_or(0..0, |m| m.range());
            // Roman-style profiles take the French canon, first centuries
            // masculine "er" and the rest "e". Arabic style keeps the
            // suffix as written.
            let canonical: &str = match group.numeral_style {
                NumeralStyle::Roman if value == 1 => "er",
                NumeralStyle::Roman => "e",
                NumeralStyle::Arabic => &text[suffix.clone()],
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

            if let Some(era_gap) = caps.get(5) {
                rw.replace(era_gap.range(), "\u{a0}");
            }
        }
        let out = rw.finish_remap(cx.spans);
        cx.spans.extend(new_spans);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerCodec;
    use crate::profile::builtin;
    use crate::style::Span;

    fn run(text: &str) -> (String, Vec<StyleApplication>) {
        let profile = builtin("fr-FR").unwrap();
        let pass = CenturyPass::new(profile);
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
    fn test_canonical_century_gets_spans_and_binding() {
        let (out, spans) = run("Le XIXe siecle");
        assert_eq!(out, "Le XIXe\u{a0}siecle");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].role, StyleRole::CenturyNumeral);
        assert_eq!(spans[0].span, Span::new(3, 6));
        assert_eq!(spans[1].role, StyleRole::SuperscriptOrdinal);
        assert_eq!(spans[1].span, Span::new(6, 7));
    }

    #[test]
    fn test_arabic_century_becomes_roman() {
        let (out, spans) = run("le 19e siècle");
        assert_eq!(out, "le XIXe\u{a0}siècle");
        assert_eq!(&out[spans[0].span.start..spans[0].span.end], "XIX");
        assert_eq!(&out[spans[1].span.start..spans[1].span.end], "e");
    }

    #[test]
    fn test_lowercase_roman_is_uppercased() {
        let (out, _) = run("au xixe siècle");
        assert_eq!(out, "au XIXe\u{a0}siècle");
    }

    #[test]
    fn test_suffix_variant_is_canonicalized() {
        let (out, _) = run("le 3ème siècle");
        assert_eq!(out, "le IIIe\u{a0}siècle");
    }

    #[test]
    fn test_first_century_takes_er() {
        let (out, _) = run("au 1er siècle");
        assert_eq!(out, "au Ier\u{a0}siècle");
        let (out, _) = run("au Ière siècle");
        assert_eq!(out, "au Ier\u{a0}siècle");
    }

    #[test]
    fn test_era_tail_is_bound() {
        let (out, _) = run("IIe siècle av. J.-C. environ");
        assert_eq!(out, "IIe\u{a0}siècle\u{a0}av. J.-C. environ");
    }

    #[test]
    fn test_abbreviated_century_word_binds() {
        let (out, spans) = run("au XIXe s.");
        assert_eq!(out, "au XIXe\u{a0}s.");
        assert_eq!(spans.len(), 2);
        assert_eq!(&out[spans[0].span.start..spans[0].span.end], "XIX");
        assert_eq!(&out[spans[1].span.start..spans[1].span.end], "e");
    }

    #[test]
    fn test_arabic_style_keeps_the_suffix_variant() {
        let overrides: toml::Table = toml::from_str("[centuries]\nenabled = true").unwrap();
        let profile = builtin("en-US").unwrap().merged_with(&overrides).unwrap();
        let pass = CenturyPass::new(&profile);
        let text = "the 19th century";
        let mut codec = MarkerCodec::for_text(text);
        let mut spans = Vec::new();
        let mut cx = PassCx {
            codec: &mut codec,
            spans: &mut spans,
        };
        let out = pass.apply(text, &mut cx);
        assert_eq!(out, "the 19th\u{a0}century");
        assert_eq!(spans.len(), 2);
        assert_eq!(&out[spans[0].span.start..spans[0].span.end], "19");
        assert_eq!(&out[spans[1].span.start..spans[1].span.end], "th");
    }

    #[test]
    fn test_bare_number_before_century_word_is_a_duration() {
        let (out, spans) = run("19 siècles plus tard");
        assert_eq!(out, "19 siècles plus tard");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_out_of_range_value_is_ignored() {
        let (out, spans) = run("le 400e siècle");
        assert_eq!(out, "le 400e siècle");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_reapplication_is_stable() {
        let (once, _) = run("le 19e siècle av. J.-C.");
        let (twice, _) = run(&once);
        assert_eq!(once, twice);
    }
}
