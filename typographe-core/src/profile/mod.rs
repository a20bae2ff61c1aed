//! Language profiles
//!
//! A profile is a TOML document declaring the typographic conventions of one
//! locale: spacing classes per punctuation mark, dash policy, quote glyphs,
//! number formatting, and the word lists the scholarly passes consume.
//!
//! Profiles are resolved once, validated, and then treated as immutable:
//! passes borrow the profile and copy what they need at construction time.

mod loader;
mod merge;

pub use loader::{builtin, builtin_ids, resolve, EmbeddedProfiles, ProfileSource};
pub use merge::merge_tables;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ProfileError, ProfileResult};

/// Top-level groups every profile must declare
const REQUIRED_GROUPS: &[&str] = &["meta", "punctuation", "dashes", "quotes", "numbers"];

/// Class of horizontal space a rule inserts or requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKind {
    /// No space; existing spaces are stripped
    #[default]
    None,
    /// Ordinary breaking space
    Space,
    /// No-break space, U+00A0
    Nbsp,
    /// Narrow no-break space, U+202F
    Nnbsp,
}

impl SpaceKind {
    /// The glyph this class inserts (empty for [`SpaceKind::None`])
    pub fn glyph(&self) -> &'static str {
        match self {
            SpaceKind::None => "",
            SpaceKind::Space => " ",
            SpaceKind::Nbsp => "\u{a0}",
            SpaceKind::Nnbsp => "\u{202f}",
        }
    }
}

/// Identity block of a profile
#[derive(Debug, Clone, Deserialize)]
pub struct MetaGroup {
    /// Stable identifier, e.g. `fr-FR`
    pub id: String,
    /// Human-readable name shown in listings
    pub label: String,
}

/// Spacing conventions around punctuation marks
#[derive(Debug, Clone, Deserialize)]
pub struct PunctuationGroup {
    pub rules: Vec<SpacingRule>,
}

/// Required spacing on each side of one mark.
///
/// An absent side means the engine leaves that side alone; an explicit
/// [`SpaceKind::None`] means existing spaces are stripped.
#[derive(Debug, Clone, Deserialize)]
pub struct SpacingRule {
    /// The mark the rule applies to
    pub mark: String,
    #[serde(default)]
    pub before: Option<SpaceKind>,
    #[serde(default)]
    pub after: Option<SpaceKind>,
}

/// Dash conventions
#[derive(Debug, Clone, Deserialize)]
pub struct DashGroup {
    /// Glyph incise dashes normalize to
    pub incise: String,
    /// How the incise dash is spaced
    pub spacing: DashSpacing,
    /// Whether existing em dashes in incise position are rewritten to the
    /// incise glyph
    #[serde(default)]
    pub demote_cadratin: bool,
}

/// Spacing policy for incise dashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashSpacing {
    /// Space on both sides (French en dash incises)
    Surround,
    /// No surrounding spaces (US em dash incises)
    Tight,
}

/// Quote and apostrophe glyphs
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteGroup {
    /// Typographic apostrophe glyph
    pub apostrophe: String,
    /// Quote pairs by nesting level, outermost first
    pub levels: Vec<QuotePair>,
    /// Space between a quote glyph and the quoted content
    #[serde(default)]
    pub inner_space: SpaceKind,
}

/// One opening/closing quote pair
#[derive(Debug, Clone, Deserialize)]
pub struct QuotePair {
    pub open: String,
    pub close: String,
}

/// Number formatting conventions
#[derive(Debug, Clone, Deserialize)]
pub struct NumberGroup {
    /// Separator inserted between digit groups
    pub thousands_separator: String,
    /// The locale's decimal mark
    pub decimal_separator: String,
    /// Whether `3.14` style decimals are rewritten to the locale mark
    #[serde(default)]
    pub convert_decimal_point: bool,
    /// Minimum digit-run length before grouping applies
    #[serde(default = "default_group_threshold")]
    pub group_threshold: usize,
    /// Space bound between a number and a following unit
    #[serde(default = "default_unit_space")]
    pub unit_space: SpaceKind,
    /// Four-digit runs inside this range are read as years and left ungrouped
    #[serde(default)]
    pub years: Option<YearRange>,
}

/// Inclusive range of values treated as years
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct YearRange {
    pub min: u32,
    pub max: u32,
}

impl YearRange {
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

fn default_group_threshold() -> usize {
    4
}

fn default_unit_space() -> SpaceKind {
    SpaceKind::Nbsp
}

fn default_true() -> bool {
    true
}

/// Century notation conventions
#[derive(Debug, Clone, Deserialize)]
pub struct CenturyGroup {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Numeral system century numbers normalize to
    pub numeral_style: NumeralStyle,
    /// Letter case of the normalized numeral
    #[serde(default)]
    pub case: LetterCase,
    /// Ordinal suffix variants recognized after the numeral
    #[serde(default)]
    pub suffixes: Vec<String>,
    /// Words that mark a century expression ("siècle")
    pub words: Vec<String>,
    /// Era tails bound to the expression ("av. J.-C.")
    #[serde(default)]
    pub era: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralStyle {
    Roman,
    Arabic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterCase {
    #[default]
    Upper,
    Lower,
}

/// Ordinal suffix conventions
#[derive(Debug, Clone, Deserialize)]
pub struct OrdinalGroup {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Suffix variant to canonical form ("ère" -> "re")
    #[serde(default)]
    pub suffixes: BTreeMap<String, String>,
    /// Honorific to its raised tail ("Mme" -> "me")
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
    /// Words that confirm a Roman numeral as an ordinal ("édition")
    #[serde(default)]
    pub triggers: Vec<String>,
}

/// Cross-reference abbreviation conventions
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceGroup {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Recognized abbreviations; dotted entries get stray-dot folding
    #[serde(default)]
    pub abbreviations: Vec<String>,
    /// Subset conventionally set in italics
    #[serde(default)]
    pub italics: Vec<String>,
    /// Subset bound to a following number with a no-break space
    #[serde(default)]
    pub bind: Vec<String>,
    /// Subset whose Roman numeral argument is set in small caps
    #[serde(default)]
    pub volumes: Vec<String>,
}

/// Word lists shared across passes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordGroup {
    /// Tokens containing straight quotes that are always apostrophes
    #[serde(default)]
    pub ambiguous: Vec<String>,
    /// Unit symbols bound to a preceding number
    #[serde(default)]
    pub units: Vec<String>,
    /// Honorifics bound to a following capitalized name
    #[serde(default)]
    pub titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileDoc {
    meta: MetaGroup,
    punctuation: PunctuationGroup,
    dashes: DashGroup,
    quotes: QuoteGroup,
    numbers: NumberGroup,
    #[serde(default)]
    centuries: Option<CenturyGroup>,
    #[serde(default)]
    ordinals: Option<OrdinalGroup>,
    #[serde(default)]
    references: Option<ReferenceGroup>,
    #[serde(default)]
    words: WordGroup,
}

/// A resolved, validated language profile.
///
/// Keeps the raw TOML table alongside the typed groups so that overrides
/// merge against the full document and unknown groups survive a merge
/// round trip.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub meta: MetaGroup,
    pub punctuation: PunctuationGroup,
    pub dashes: DashGroup,
    pub quotes: QuoteGroup,
    pub numbers: NumberGroup,
    pub centuries: Option<CenturyGroup>,
    pub ordinals: Option<OrdinalGroup>,
    pub references: Option<ReferenceGroup>,
    pub words: WordGroup,
    raw: toml::Table,
}

impl LanguageProfile {
    /// Parses and validates a profile document.
    ///
    /// When `requested_id` is given, the document's declared id must match.
    pub fn from_toml_str(requested_id: Option<&str>, text: &str) -> ProfileResult<Self> {
        let id_hint = requested_id.unwrap_or("<inline>");
        let raw: toml::Table = toml::from_str(text).map_err(|e| ProfileError::Parse {
            id: id_hint.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_table(requested_id, raw)
    }

    /// Validates an already-parsed document
    pub fn from_table(requested_id: Option<&str>, raw: toml::Table) -> ProfileResult<Self> {
        let id_hint = requested_id
            .map(str::to_string)
            .or_else(|| declared_id(&raw))
            .unwrap_or_else(|| "<inline>".to_string());

        for group in REQUIRED_GROUPS.iter().copied() {
            if !raw.contains_key(group) {
                return Err(ProfileError::Validation { id: id_hint, group });
            }
        }

        let doc: ProfileDoc =
            toml::Value::Table(raw.clone())
                .try_into()
                .map_err(|e: toml::de::Error| ProfileError::Parse {
                    id: id_hint.clone(),
                    reason: e.to_string(),
                })?;

        if let Some(requested) = requested_id {
            if doc.meta.id != requested {
                return Err(ProfileError::IdMismatch {
                    requested: requested.to_string(),
                    declared: doc.meta.id,
                });
            }
        }

        let profile = Self {
            meta: doc.meta,
            punctuation: doc.punctuation,
            dashes: doc.dashes,
            quotes: doc.quotes,
            numbers: doc.numbers,
            centuries: doc.centuries,
            ordinals: doc.ordinals,
            references: doc.references,
            words: doc.words,
            raw,
        };
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> ProfileResult<()> {
        let fail = |reason: String| ProfileError::Parse {
            id: self.meta.id.clone(),
            reason,
        };
        if self.meta.id.is_empty() {
            return Err(fail("meta.id is empty".to_string()));
        }
        if self.dashes.incise.is_empty() {
            return Err(fail("dashes.incise is empty".to_string()));
        }
        if self.quotes.levels.is_empty() {
            return Err(fail("quotes.levels is empty".to_string()));
        }
        for rule in &self.punctuation.rules {
            if rule.mark.is_empty() {
                return Err(fail("punctuation rule with empty mark".to_string()));
            }
            if rule.before.is_none() && rule.after.is_none() {
                return Err(fail(format!(
                    "punctuation rule for '{}' declares no side",
                    rule.mark
                )));
            }
        }
        Ok(())
    }

    /// Stable profile identifier
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    /// Human-readable profile name
    pub fn label(&self) -> &str {
        &self.meta.label
    }

    /// The full document, unknown groups included
    pub fn as_table(&self) -> &toml::Table {
        &self.raw
    }

    /// Returns a new profile with `overrides` merged over this document.
    ///
    /// Tables merge recursively; scalars and arrays from the override
    /// replace the base value. The merged document is validated again.
    pub fn merged_with(&self, overrides: &toml::Table) -> ProfileResult<Self> {
        let merged = merge::merge_tables(&self.raw, overrides);
        Self::from_table(None, merged)
    }
}

fn declared_id(raw: &toml::Table) -> Option<String> {
    raw.get("meta")?
        .as_table()?
        .get("id")?
        .as_str()
        .map(str::to_string)
}
