//! Punctuation spacing pass
//!
//! Applies each profile spacing rule as its own scan: multi-space collapse
//! first, then the required space before each mark class, then the space
//! after. A gap between two managed marks belongs to the mark on its right,
//! which keeps before/after rules from rewriting the same gap in turns.

use regex::Regex;

use crate::pass::{
    alternation, compile, is_space_like, next_char, prev_char, Pass, PassCx,
};
use crate::profile::{LanguageProfile, SpaceKind};
use crate::rewrite::Rewriter;

const SPACE_RUN: &str = "[ \\t\\u{A0}\\u{202F}]*";

struct SideRule {
    glyph: &'static str,
    re: Regex,
}

pub(crate) struct SpacingPass {
    collapse_re: Regex,
    before_rules: Vec<SideRule>,
    after_rules: Vec<SideRule>,
}

impl SpacingPass {
    pub(crate) fn new(profile: &LanguageProfile) -> Self {
        let mut before_groups: Vec<(SpaceKind, Vec<String>)> = Vec::new();
        let mut after_groups: Vec<(SpaceKind, Vec<String>)> = Vec::new();
        for rule in &profile.punctuation.rules {
            if let Some(kind) = rule.before {
                push_mark(&mut before_groups, kind, &rule.mark);
            }
            if let Some(kind) = rule.after {
                push_mark(&mut after_groups, kind, &rule.mark);
            }
        }

        let before_rules = before_groups
            .into_iter()
            .map(|(kind, marks)| SideRule {
                glyph: kind.glyph(),
                re: compile(&format!("({SPACE_RUN})((?:{})+)", alternation(&marks))),
            })
            .collect();
        let after_rules = after_groups
            .into_iter()
            .map(|(kind, marks)| SideRule {
                glyph: kind.glyph(),
                re: compile(&format!("((?:{})+)({SPACE_RUN})", alternation(&marks))),
            })
            .collect();

        Self {
            collapse_re: compile("[ \\t]{2,}"),
            before_rules,
            after_rules,
        }
    }

    fn collapse(&self, text: &str) -> (String, Vec<crate::rewrite::Edit>) {
        let mut rw = Rewriter::new(text);
        for m in self.collapse_re.find_iter(text) {
            // Leave leading indentation alone.
            match prev_char(text, m.start()) {
                None | Some('\n') | Some('\r') => continue,
                _ => rw.replace(m.range(), " "),
            }
        }
        rw.finish()
    }

    fn apply_before(&self, text: &str, rule: &SideRule) -> (String, Vec<crate::rewrite::Edit>) {
        let mut rw = Rewriter::new(text);
        for caps in rule.re.captures_iter(text) {
            let spaces = caps.get(1).map_or(0..0, |m| m.range());
            let cluster = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let cluster_end = caps.get(0).map_or(0, |m| m.end());

            match prev_char(text, spaces.start) {
                None | Some('\n') | Some('\r') => continue,
                Some(c) if is_space_like(c) => continue,
                Some(prev) => {
                    if skip_colon_context(text, prev, cluster, cluster_end) {
                        continue;
                    }
                    let current = &text[spaces.clone()];
                    if current != rule.glyph {
                        rw.replace(spaces, rule.glyph);
                    }
                }
            }
        }
        rw.finish()
    }

    fn apply_after(&self, text: &str, rule: &SideRule) -> (String, Vec<crate::rewrite::Edit>) {
        let mut rw = Rewriter::new(text);
        for caps in rule.re.captures_iter(text) {
            let cluster_range = caps.get(1).map_or(0..0, |m| m.range());
            let cluster = &text[cluster_range.clone()];
            let spaces = caps.get(2).map_or(0..0, |m| m.range());
            let end = caps.get(0).map_or(0, |m| m.end());

            // Only open a gap in front of running content. Marks, closing
            // brackets, and line ends keep their own spacing rules.
            let Some(next) = next_char(text, end) else {
                continue;
            };
            if !(next.is_alphanumeric() || matches!(next, '«' | '“' | '(' | '"' | '\'')) {
                continue;
            }
            let prev = prev_char(text, cluster_range.start);
            if skip_colon_context(text, prev.unwrap_or(' '), cluster, end) {
                continue;
            }
            // Decimal commas and dotted numbers stay tight.
            if prev.is_some_and(|c| c.is_ascii_digit()) && next.is_ascii_digit() {
                continue;
            }
            let current = &text[spaces.clone()];
            if current != rule.glyph {
                rw.replace(spaces, rule.glyph);
            }
        }
        rw.finish()
    }
}

fn skip_colon_context(text: &str, prev: char, cluster: &str, cluster_end: usize) -> bool {
    if !cluster.contains(':') {
        return false;
    }
    // "::" is a path separator in identifiers, never punctuation.
    if cluster.chars().count() > 1 {
        return true;
    }
    // Clock times keep their tight colon.
    if prev.is_ascii_digit() && next_char(text, cluster_end).is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    // Scheme separators as in "https://".
    text[cluster_end..].starts_with("//")
}

fn push_mark(groups: &mut Vec<(SpaceKind, Vec<String>)>, kind: SpaceKind, mark: &str) {
    match groups.iter_mut().find(|(k, _)| *k == kind) {
        Some((_, marks)) => marks.push(mark.to_string()),
        None => groups.push((kind, vec![mark.to_string()])),
    }
}

impl Pass for SpacingPass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String {
        let mut current = text.to_string();

        let (next, edits) = self.collapse(&current);
        crate::rewrite::remap_applications(&edits, cx.spans);
        current = next;

        for rule in &self.before_rules {
            let (next, edits) = self.apply_before(&current, rule);
            crate::rewrite::remap_applications(&edits, cx.spans);
            current = next;
        }
        for rule in &self.after_rules {
            let (next, edits) = self.apply_after(&current, rule);
            crate::rewrite::remap_applications(&edits, cx.spans);
            current = next;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerCodec;
    use crate::profile::builtin;

    fn run(profile_id: &str, text: &str) -> String {
        let profile = builtin(profile_id).unwrap();
        let pass = SpacingPass::new(profile);
        let mut codec = MarkerCodec::for_text(text);
        let mut spans = Vec::new();
        let mut cx = PassCx {
            codec: &mut codec,
            spans: &mut spans,
        };
        pass.apply(text, &mut cx)
    }

    #[test]
    fn test_narrow_nbsp_before_two_part_marks() {
        assert_eq!(run("fr-FR", "Bonjour !"), "Bonjour\u{202f}!");
        assert_eq!(run("fr-FR", "Vraiment ?"), "Vraiment\u{202f}?");
        assert_eq!(run("fr-FR", "oui ; non"), "oui\u{202f}; non");
    }

    #[test]
    fn test_missing_space_is_inserted() {
        assert_eq!(run("fr-FR", "Bonjour!"), "Bonjour\u{202f}!");
        assert_eq!(run("fr-FR", "total: 12"), "total\u{a0}: 12");
    }

    #[test]
    fn test_wrong_space_is_replaced_not_doubled() {
        assert_eq!(run("fr-FR", "Bonjour\u{a0}!"), "Bonjour\u{202f}!");
        assert_eq!(run("fr-FR", "Bonjour  !"), "Bonjour\u{202f}!");
    }

    #[test]
    fn test_space_before_comma_is_stripped() {
        assert_eq!(run("fr-FR", "mot , mot"), "mot, mot");
        assert_eq!(run("fr-FR", "fin ."), "fin.");
    }

    #[test]
    fn test_space_after_comma_is_inserted() {
        assert_eq!(run("fr-FR", "mot,mot"), "mot, mot");
    }

    #[test]
    fn test_decimal_comma_stays_tight() {
        assert_eq!(run("fr-FR", "3,14 et 1,5"), "3,14 et 1,5");
    }

    #[test]
    fn test_clock_time_colon_stays_tight() {
        assert_eq!(run("fr-FR", "rendez-vous à 12:30"), "rendez-vous à 12:30");
    }

    #[test]
    fn test_identifier_and_url_colons_are_left_alone() {
        assert_eq!(run("fr-FR", "std::fs"), "std::fs");
        assert_eq!(run("fr-FR", "voir https://exemple.fr"), "voir https://exemple.fr");
    }

    #[test]
    fn test_guillemets_get_inner_nbsp() {
        assert_eq!(run("fr-FR", "« mot »"), "«\u{a0}mot\u{a0}»");
        assert_eq!(run("fr-FR", "«mot»"), "«\u{a0}mot\u{a0}»");
    }

    #[test]
    fn test_line_leading_marks_are_untouched() {
        assert_eq!(run("fr-FR", "! surprise"), "! surprise");
        assert_eq!(run("fr-FR", "avant\n! après"), "avant\n! après");
    }

    #[test]
    fn test_indentation_survives() {
        assert_eq!(run("fr-FR", "liste :\n    item"), "liste\u{a0}:\n    item");
    }

    #[test]
    fn test_english_strips_french_spacing() {
        assert_eq!(run("en-US", "Wait !"), "Wait!");
        assert_eq!(run("en-US", "really ?"), "really?");
        assert_eq!(run("en-US", "note\u{a0}: yes"), "note: yes");
    }

    #[test]
    fn test_multiple_marks_cluster_as_one() {
        assert_eq!(run("fr-FR", "Quoi ?!"), "Quoi\u{202f}?!");
        assert_eq!(run("fr-FR", "Non!!"), "Non\u{202f}!!");
    }

    #[test]
    fn test_second_application_is_identity() {
        let once = run("fr-FR", "Il dit : « Quoi ?! » , puis rien .");
        let twice = run("fr-FR", &once);
        assert_eq!(once, twice);
    }
}
