//! Value range pass
//!
//! A hyphen between two standalone numbers reads as "from-to" and becomes
//! an en dash. Anything attached to more text keeps its hyphen: dates,
//! phone numbers, identifiers. Letter pairs only qualify when both sides
//! are Roman numerals and at least one side is longer than a single
//! letter, so "A-B" and "I-V" stay as typed.

use regex::Regex;

use crate::pass::{compile, next_char, prev_char, roman, Pass, PassCx};
use crate::profile::LanguageProfile;
use crate::rewrite::Rewriter;

const EN_DASH: &str = "\u{2013}";

pub(crate) struct RangePass {
    digit_re: Regex,
    roman_re: Regex,
}

impl RangePass {
    pub(crate) fn new(_profile: &LanguageProfile) -> Self {
        Self {
            digit_re: compile(r"(\d+)-(\d+)"),
            roman_re: compile(r"([IVXLCDM]+)-([IVXLCDM]+)"),
        }
    }

    fn convert(&self, re: &Regex, text: &str, rw: &mut Rewriter<'_>, roman: bool) {
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            if prev_char(text, whole.start).is_some_and(touches_more)
                || next_char(text, whole.end).is_some_and(touches_more)
            {
                continue;
            }
            let left = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let right = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            if roman {
                if left.chars().count() < 2 && right.chars().count() < 2 {
                    continue;
                }
                if roman::from_roman(left).is_none() || roman::from_roman(right).is_none() {
                    continue;
                }
            }
            let hyphen = whole.start + left.len();
            rw.replace(hyphen..hyphen + 1, EN_DASH);
        }
    }
}

fn touches_more(c: char) -> bool {
    c.is_alphanumeric() || c == '-'
}

impl Pass for RangePass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let mut rw = Rewriter::new(text);
        self.convert(&self.digit_re, text, &mut rw, false);
        let current = rw.finish_remap(cx.spans);

        let mut rw = Rewriter::new(&current);
        self.convert(&self.roman_re, &current, &mut rw, true);
        rw.finish_remap(cx.spans)
    }
}
