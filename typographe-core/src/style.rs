//! Style roles and the role-to-style mapper
//!
//! Passes never know about presentation. They emit [`StyleApplication`]s
//! carrying an abstract [`StyleRole`]; the host supplies a [`StyleRoleMap`]
//! naming its own character styles, and [`materialize`] joins the two.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// Abstract formatting intent attached to a span of corrected text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleRole {
    /// Ordinal suffix raised above the baseline ("1re", "XIXe")
    SuperscriptOrdinal,
    /// Honorific tail raised above the baseline ("Mme", "Dr")
    SuperscriptTitle,
    /// Century numeral set in its dedicated style (usually small caps)
    CenturyNumeral,
    /// Roman volume or tome numbers
    SmallCaps,
    /// Scholarly abbreviations conventionally italicized
    Italic,
}

impl StyleRole {
    /// Stable identifier used in serialized output and role maps
    pub fn id(&self) -> &'static str {
        match self {
            StyleRole::SuperscriptOrdinal => "superscript-ordinal",
            StyleRole::SuperscriptTitle => "superscript-title",
            StyleRole::CenturyNumeral => "century-numeral",
            StyleRole::SmallCaps => "small-caps",
            StyleRole::Italic => "italic",
        }
    }

    /// Every role the engine can emit
    pub fn all() -> &'static [StyleRole] {
        &[
            StyleRole::SuperscriptOrdinal,
            StyleRole::SuperscriptTitle,
            StyleRole::CenturyNumeral,
            StyleRole::SmallCaps,
            StyleRole::Italic,
        ]
    }
}

impl fmt::Display for StyleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StyleRole {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleRole::all()
            .iter()
            .copied()
            .find(|r| r.id() == s)
            .ok_or_else(|| StyleError::UnknownRole {
                role: s.to_string(),
            })
    }
}

/// Half-open byte range `[start, end)` into the corrected text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start, in bytes
    pub start: usize,
    /// Exclusive end, in bytes
    pub end: usize,
}

impl Span {
    /// Creates a span; `start` must not exceed `end`
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    /// Byte length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A role attached to a span of the corrected text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleApplication {
    /// Where in the corrected text the role applies
    pub span: Span,
    /// What formatting intent the span carries
    pub role: StyleRole,
}

impl StyleApplication {
    pub fn new(start: usize, end: usize, role: StyleRole) -> Self {
        Self {
            span: Span::new(start, end),
            role,
        }
    }
}

/// Host-supplied mapping from roles to concrete style identifiers
pub type StyleRoleMap = HashMap<StyleRole, String>;

/// A span resolved against a host style name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    /// Where in the corrected text the style applies
    pub span: Span,
    /// The host's style identifier
    pub style: String,
}

/// Resolves every application against the role map.
///
/// Fails on the first role absent from the map. Use [`materialize_lossy`]
/// when unknown roles should be skipped and reported instead.
pub fn materialize(
    applications: &[StyleApplication],
    roles: &StyleRoleMap,
) -> Result<Vec<StyledSpan>, StyleError> {
    applications
        .iter()
        .map(|app| {
            roles
                .get(&app.role)
                .map(|style| StyledSpan {
                    span: app.span,
                    style: style.clone(),
                })
                .ok_or_else(|| StyleError::UnknownRole {
                    role: app.role.id().to_string(),
                })
        })
        .collect()
}

/// Resolves what it can, collecting an error per unmapped role occurrence.
///
/// The unmapped applications are dropped from the output, never restyled
/// with a guessed fallback.
pub fn materialize_lossy(
    applications: &[StyleApplication],
    roles: &StyleRoleMap,
) -> (Vec<StyledSpan>, Vec<StyleError>) {
    let mut resolved = Vec::with_capacity(applications.len());
    let mut errors = Vec::new();
    for app in applications {
        match roles.get(&app.role) {
            Some(style) => resolved.push(StyledSpan {
                span: app.span,
                style: style.clone(),
            }),
            None => errors.push(StyleError::UnknownRole {
                role: app.role.id().to_string(),
            }),
        }
    }
    (resolved, errors)
}
