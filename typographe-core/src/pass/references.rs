//! Cross-reference pass
//!
//! Works from the profile's abbreviation lists: folds stray dots after
//! dotted abbreviations ("etc..." and "etc…" become "etc."), binds
//! reference abbreviations and honorifics to their argument with a
//! no-break space, and emits italic and small-caps spans over the
//! conventional candidates. Spans never rewrite text on their own.

use regex::Regex;
use smallvec::SmallVec;

use crate::pass::{alternation, compile, next_char, prev_char, roman, Pass, PassCx};
use crate::profile::LanguageProfile;
use crate::rewrite::Rewriter;
use crate::style::{StyleApplication, StyleRole};

type SpanBuf = SmallVec<[StyleApplication; 4]>;

const SPACES: &str = "[ \\t\\u{A0}\\u{202F}]+";

pub(crate) struct ReferencePass {
    fold_re: Option<Regex>,
    bind_re: Option<Regex>,
    title_re: Option<Regex>,
    volume_re: Option<Regex>,
    italics_re: Option<Regex>,
}

impl ReferencePass {
    pub(crate) fn new(profile: &LanguageProfile) -> Self {
        let Some(group) = profile.references.clone() else {
            return Self {
                fold_re: None,
                bind_re: None,
                title_re: None,
                volume_re: None,
                italics_re: None,
            };
        };

        let stems: Vec<String> = group
            .abbreviations
            .iter()
            .filter_map(|abbr| abbr.strip_suffix('.').map(str::to_string))
            .collect();
        let fold_re = (!stems.is_empty()).then(|| {
            compile(&format!(
                "(?:{})(\\.+|\\.?\u{2026})",
                alternation(&stems)
            ))
        });

        let bind_re = (!group.bind.is_empty()).then(|| {
            compile(&format!(
                "(?:{})({SPACES})(\\d+|[IVXLCDM]+)",
                alternation(&group.bind)
            ))
        });

        let title_re = (!profile.words.titles.is_empty()).then(|| {
            compile(&format!(
                "(?:{})({SPACES})\\p{{Lu}}",
                alternation(&profile.words.titles)
            ))
        });

        let volume_re = (!group.volumes.is_empty()).then(|| {
            compile(&format!(
                "(?:{}){SPACES}([IVXLCDM]+)",
                alternation(&group.volumes)
            ))
        });

        let italics_re =
            (!group.italics.is_empty()).then(|| compile(&alternation(&group.italics)));

        Self {
            fold_re,
            bind_re,
            title_re,
            volume_re,
            italics_re,
        }
    }

    fn fold_dots(&self, text: &str, spans: &mut Vec<StyleApplication>) -> String {
        let Some(re) = &self.fold_re else {
            return text.to_string();
        };
        let mut rw = Rewriter::new(text);
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            if prev_char(text, whole.start).is_some_and(char::is_alphanumeric) {
                continue;
            }
            let tail = caps.get(1).map_or(0..0, |m| m.range());
            rw.replace(tail, ".");
        }
        rw.finish_remap(spans)
    }

    fn bind_arguments(&self, text: &str, spans: &mut Vec<StyleApplication>) -> String {
        let Some(re) = &self.bind_re else {
            return text.to_string();
        };
        let mut rw = Rewriter::new(text);
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            if prev_char(text, whole.start).is_some_and(char::is_alphanumeric)
                || next_char(text, whole.end).is_some_and(char::is_alphanumeric)
            {
                continue;
            }
            let gap = caps.get(1).map_or(0..0, |m| m.range());
            rw.replace(gap, "\u{a0}");
        }
        rw.finish_remap(spans)
    }

    fn bind_titles(&self, text: &str, spans: &mut Vec<StyleApplication>) -> String {
        let Some(re) = &self.title_re else {
            return text.to_string();
        };
        let mut rw = Rewriter::new(text);
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            if prev_char(text, whole.start).is_some_and(char::is_alphanumeric) {
                continue;
            }
            let gap = caps.get(1).map_or(0..0, |m| m.range());
            rw.replace(gap, "\u{a0}");
        }
        rw.finish_remap(spans)
    }

    fn mark_spans(&self, text: &str, spans: &mut Vec<StyleApplication>) {
        let mut new_spans = SpanBuf::new();
        if let Some(re) = &self.volume_re {
            for caps in re.captures_iter(text) {
                let whole = caps.get(0).map_or(0..0, |m| m.range());
                if prev_char(text, whole.start).is_some_and(char::is_alphanumeric)
                    || next_char(text, whole.end).is_some_and(char::is_alphanumeric)
                {
                    continue;
                }
                let numeral = caps.get(1).map_or(0..0, |m| m.range());
                if roman::from_roman(&text[numeral.clone()]).is_none() {
                    continue;
                }
                new_spans.push(StyleApplication::new(
                    numeral.start,
                    numeral.end,
                    StyleRole::SmallCaps,
                ));
            }
        }
        if let Some(re) = &self.italics_re {
            for m in re.find_iter(text) {
                if prev_char(text, m.start()).is_some_and(char::is_alphanumeric)
                    || next_char(text, m.end()).is_some_and(char::is_alphanumeric)
                {
                    continue;
                }
                new_spans.push(StyleApplication::new(
                    m.start(),
                    m.end(),
                    StyleRole::Italic,
                ));
            }
        }
        spans.extend(new_spans);
    }
}

impl Pass for ReferencePass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let current = self.fold_dots(text, cx.spans);
        let current = self.bind_arguments(&current, cx.spans);
        let current = self.bind_titles(&current, cx.spans);
        self.mark_spans(&current, cx.spans);
        current
    }
}
