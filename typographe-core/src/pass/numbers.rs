//! Number formatting pass
//!
//! Converts decimal points to the profile's decimal separator, binds
//! numbers to a following unit symbol with the profile's unit space, and
//! groups long digit runs with the profile's thousands separator. Runs
//! inside the year exclusion range stay plain, as do version-style dotted
//! chains, fraction digits, and numbers a reference abbreviation already
//! claimed with a no-break space. Only ASCII digits count as numbers;
//! digit runs from other scripts pass through untouched.
//!
//! Every grouped run is swapped for a codec token on the spot, so the
//! fixpoint re-scan sees no digits where a separator was just inserted.

use std::ops::Range;

use regex::Regex;

use crate::marker::MarkerCodec;
use crate::pass::{alternation, compile, next_char, prev_char, Pass, PassCx};
use crate::profile::{LanguageProfile, YearRange};
use crate::rewrite::Rewriter;
use crate::style::StyleApplication;

const GAP: &str = "[ \\t\\u{A0}\\u{202F}]+";

pub(crate) struct NumberPass {
    decimal_separator: String,
    thousands_separator: String,
    group_threshold: usize,
    years: Option<YearRange>,
    unit_space: &'static str,
    /// Dotted chains like `1.2.3` are identifiers, never decimals
    chain_re: Regex,
    decimal_re: Option<Regex>,
    unit_re: Option<Regex>,
    run_re: Regex,
}

impl NumberPass {
    pub(crate) fn new(profile: &LanguageProfile) -> Self {
        let numbers = &profile.numbers;
        let decimal_re = numbers
            .convert_decimal_point
            .then(|| compile("[0-9](\\.)[0-9]"));
        let unit_re = (!profile.words.units.is_empty()).then(|| {
            compile(&format!(
                "[0-9]({GAP})(?:{})",
                alternation(&profile.words.units)
            ))
        });
        Self {
            decimal_separator: numbers.decimal_separator.clone(),
            thousands_separator: numbers.thousands_separator.clone(),
            group_threshold: numbers.group_threshold.max(2),
            years: numbers.years,
            unit_space: numbers.unit_space.glyph(),
            chain_re: compile("[0-9]+(?:\\.[0-9]+){2,}"),
            decimal_re,
            unit_re,
            run_re: compile("[0-9]+"),
        }
    }

    fn chain_zones(&self, text: &str) -> Vec<Range<usize>> {
        self.chain_re.find_iter(text).map(|m| m.range()).collect()
    }

    fn convert_decimals(&self, text: &str, spans: &mut Vec<StyleApplication>) -> String {
        let Some(re) = &self.decimal_re else {
            return text.to_string();
        };
        let zones = self.chain_zones(text);
        let mut rw = Rewriter::new(text);
        for caps in re.captures_iter(text) {
            let dot = caps.get(1).map_or(0..0, |m| m.range());
            if intersects(&zones, &dot) {
                continue;
            }
            rw.replace(dot, &self.decimal_separator);
        }
        rw.finish_remap(spans)
    }

    fn bind_units(&self, text: &str, spans: &mut Vec<StyleApplication>) -> String {
        let Some(re) = &self.unit_re else {
            return text.to_string();
        };
        let mut rw = Rewriter::new(text);
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            if next_char(text, whole.end).is_some_and(char::is_alphanumeric) {
                continue;
            }
            let gap = caps.get(1).map_or(0..0, |m| m.range());
            rw.replace(gap, self.unit_space);
        }
        rw.finish_remap(spans)
    }

    fn group_runs(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let zones = self.chain_zones(text);
        let mut rw = Rewriter::new(text);
        for m in self.run_re.find_iter(text) {
            let run = m.range();
            let digits = m.as_str();
            if digits.len() < self.group_threshold || digits.starts_with('0') {
                continue;
            }
            if intersects(&zones, &run) {
                continue;
            }
            if digits.len() == 4 && self.is_year(digits) {
                continue;
            }
            if self.follows_separator(text, run.start, cx.codec) {
                continue;
            }
            // A no-break space before the run means something already
            // claimed it, typically a page or article reference.
            if prev_char(text, run.start) == Some('\u{a0}') {
                continue;
            }
            let grouped = group_digits(digits, &self.thousands_separator);
            let token = cx.codec.mark(&grouped);
            rw.replace(run, &token);
        }
        rw.finish_remap(cx.spans)
    }

    fn is_year(&self, digits: &str) -> bool {
        let Some(years) = self.years else {
            return false;
        };
        digits.parse::<u32>().is_ok_and(|value| years.contains(value))
    }

    /// True when the run continues a number to its left, either as a
    /// fraction part or as an already-separated group. The left part may
    /// already sit behind a codec token from an earlier iteration, so a
    /// token boundary counts as digits.
    fn follows_separator(&self, text: &str, start: usize, codec: &MarkerCodec) -> bool {
        let Some(prev) = prev_char(text, start) else {
            return false;
        };
        let mut buf = [0u8; 4];
        let sep: &str = prev.encode_utf8(&mut buf);
        if sep != self.decimal_separator && sep != self.thousands_separator {
            return false;
        }
        let before = start - prev.len_utf8();
        prev_char(text, before).is_some_and(|c| c.is_ascii_digit())
            || codec.ends_with_token(&text[..before])
    }
}

impl Pass for NumberPass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let current = self.convert_decimals(text, cx.spans);
        let current = self.bind_units(&current, cx.spans);
        self.group_runs(&current, cx)
    }
}

fn intersects(zones: &[Range<usize>], range: &Range<usize>) -> bool {
    zones.iter().any(|z| range.start < z.end && z.start < range.end)
}

/// Inserts `separator` between three-digit groups, counted from the right
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + 2 * separator.len());
    for (i, c) in digits.char_indices() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
