//! Correction passes
//!
//! The registry is fixed: passes always run in rank order, each at most
//! once per pipeline stage, so rule interactions are decided here rather
//! than at call sites. Profile content only decides whether a pass is
//! applicable, never where it runs.

mod apostrophes;
mod centuries;
mod dashes;
mod numbers;
mod ordinals;
mod quotes;
mod ranges;
mod references;
mod roman;
mod spacing;

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::guard::DEFAULT_MAX_ITERATIONS;
use crate::marker::MarkerCodec;
use crate::profile::LanguageProfile;
use crate::style::StyleApplication;

/// Identifies one pass of the fixed registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassId {
    Spacing,
    Dashes,
    Apostrophes,
    Quotes,
    Ranges,
    Ordinals,
    Centuries,
    References,
    Numbers,
}

impl PassId {
    /// Stable identifier used in listings and diagnostics
    pub fn id(&self) -> &'static str {
        match self {
            PassId::Spacing => "spacing",
            PassId::Dashes => "dashes",
            PassId::Apostrophes => "apostrophes",
            PassId::Quotes => "quotes",
            PassId::Ranges => "ranges",
            PassId::Ordinals => "ordinals",
            PassId::Centuries => "centuries",
            PassId::References => "references",
            PassId::Numbers => "numbers",
        }
    }

    /// Every pass id, in registry order
    pub fn all() -> Vec<PassId> {
        registry().iter().map(|spec| spec.id).collect()
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PassId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry()
            .iter()
            .map(|spec| spec.id)
            .find(|id| id.id() == s)
            .ok_or_else(|| format!("unknown pass: {s}"))
    }
}

/// Broad family a pass belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassCategory {
    /// Spacing, dashes, apostrophes, quotes
    Punctuation,
    /// Ranges and number formatting
    Numeric,
    /// Ordinals, centuries, cross-references
    Notation,
}

/// How often a pass runs within its pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Convergence {
    /// One application; the pass is idempotent by construction
    Single,
    /// Re-applied until output stops changing, under a loop guard
    IterateToFixpoint,
}

/// Registry entry describing one pass
#[derive(Debug, Clone, Copy)]
pub struct PassSpec {
    pub id: PassId,
    /// Position in the run order; lower ranks run first
    pub rank: u16,
    pub category: PassCategory,
    pub convergence: Convergence,
    /// Iteration bound for [`Convergence::IterateToFixpoint`]
    pub max_iterations: usize,
    /// Whether the profile makes this pass applicable
    pub applies: fn(&LanguageProfile) -> bool,
}

fn always(_: &LanguageProfile) -> bool {
    true
}

fn ordinals_enabled(profile: &LanguageProfile) -> bool {
    profile.ordinals.as_ref().is_some_and(|g| g.enabled)
}

fn centuries_enabled(profile: &LanguageProfile) -> bool {
    profile.centuries.as_ref().is_some_and(|g| g.enabled)
}

fn references_enabled(profile: &LanguageProfile) -> bool {
    profile.references.as_ref().is_some_and(|g| g.enabled)
}

static REGISTRY: [PassSpec; 9] = [
    PassSpec {
        id: PassId::Spacing,
        rank: 10,
        category: PassCategory::Punctuation,
        convergence: Convergence::IterateToFixpoint,
        max_iterations: DEFAULT_MAX_ITERATIONS,
        applies: always,
    },
    PassSpec {
        id: PassId::Dashes,
        rank: 20,
        category: PassCategory::Punctuation,
        convergence: Convergence::Single,
        max_iterations: 1,
        applies: always,
    },
    PassSpec {
        id: PassId::Apostrophes,
        rank: 30,
        category: PassCategory::Punctuation,
        convergence: Convergence::Single,
        max_iterations: 1,
        applies: always,
    },
    PassSpec {
        id: PassId::Quotes,
        rank: 40,
        category: PassCategory::Punctuation,
        convergence: Convergence::Single,
        max_iterations: 1,
        applies: always,
    },
    PassSpec {
        id: PassId::Ranges,
        rank: 50,
        category: PassCategory::Numeric,
        convergence: Convergence::Single,
        max_iterations: 1,
        applies: always,
    },
    PassSpec {
        id: PassId::Ordinals,
        rank: 60,
        category: PassCategory::Notation,
        convergence: Convergence::Single,
        max_iterations: 1,
        applies: ordinals_enabled,
    },
    PassSpec {
        id: PassId::Centuries,
        rank: 70,
        category: PassCategory::Notation,
        convergence: Convergence::Single,
        max_iterations: 1,
        applies: centuries_enabled,
    },
    PassSpec {
        id: PassId::References,
        rank: 80,
        category: PassCategory::Notation,
        convergence: Convergence::Single,
        max_iterations: 1,
        applies: references_enabled,
    },
    PassSpec {
        id: PassId::Numbers,
        rank: 90,
        category: PassCategory::Numeric,
        convergence: Convergence::IterateToFixpoint,
        max_iterations: DEFAULT_MAX_ITERATIONS,
        applies: always,
    },
];

/// The fixed pass registry, in run order
pub fn registry() -> &'static [PassSpec] {
    &REGISTRY
}

/// Mutable state a pass works against
pub(crate) struct PassCx<'a> {
    /// Codec for protecting freshly produced text from later rules
    pub codec: &'a mut MarkerCodec,
    /// Live span list, always in current-text coordinates
    pub spans: &'a mut Vec<StyleApplication>,
}

/// One correction pass, compiled against a profile
pub(crate) trait Pass {
    fn apply(&self, text: &str, cx: &mut PassCx<'_>) -> String;
}

/// Builds the pass implementation for `id`
pub(crate) fn instantiate(id: PassId, profile: &LanguageProfile) -> Box<dyn Pass> {
    match id {
        PassId::Spacing => Box::new(spacing::SpacingPass::new(profile)),
        PassId::Dashes => Box::new(dashes::DashPass::new(profile)),
        PassId::Apostrophes => Box::new(apostrophes::ApostrophePass::new(profile)),
        PassId::Quotes => Box::new(quotes::QuotePass::new(profile)),
        PassId::Ranges => Box::new(ranges::RangePass::new(profile)),
        PassId::Ordinals => Box::new(ordinals::OrdinalPass::new(profile)),
        PassId::Centuries => Box::new(centuries::CenturyPass::new(profile)),
        PassId::References => Box::new(references::ReferencePass::new(profile)),
        PassId::Numbers => Box::new(numbers::NumberPass::new(profile)),
    }
}

/// Compiles a pattern assembled from fixed glue and escaped literals.
///
/// Every dynamic fragment goes through [`regex::escape`] first, so the
/// pattern text is valid by construction.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("pass pattern failed to compile: {e}"))
}

/// Escaped alternation of `items`, longest entry first so shorter entries
/// cannot shadow longer ones
pub(crate) fn alternation(items: &[String]) -> String {
    let mut sorted: Vec<&String> = items.iter().collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let escaped: Vec<String> = sorted.iter().map(|item| regex::escape(item)).collect();
    escaped.join("|")
}

/// Horizontal spaces the engine manages
pub(crate) fn is_space_like(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{a0}' | '\u{202f}')
}

/// Last char before byte `pos`
pub(crate) fn prev_char(text: &str, pos: usize) -> Option<char> {
    text[..pos].chars().next_back()
}

/// First char at or after byte `pos`
pub(crate) fn next_char(text: &str, pos: usize) -> Option<char> {
    text[pos..].chars().next()
}
