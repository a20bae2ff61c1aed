//! Profile resolution
//!
//! Built-in profiles are embedded in the binary and parsed once on first
//! use. Hosts with their own profile storage implement [`ProfileSource`]
//! and resolve through it; override fragments merge over whichever base
//! the source produced.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{ProfileError, ProfileResult};
use crate::profile::LanguageProfile;

/// Embedded profile documents, compiled into the binary
const EMBEDDED: &[(&str, &str)] = &[
    (
        "fr-FR",
        include_str!("../../configs/profiles/fr-FR.toml"),
    ),
    (
        "en-US",
        include_str!("../../configs/profiles/en-US.toml"),
    ),
];

/// Where profile documents come from
pub trait ProfileSource {
    /// Returns the TOML text for `id`
    fn load(&self, id: &str) -> ProfileResult<String>;

    /// Ids this source can load
    fn available(&self) -> Vec<String>;
}

/// Source backed by the embedded documents
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedProfiles;

impl ProfileSource for EmbeddedProfiles {
    fn load(&self, id: &str) -> ProfileResult<String> {
        EMBEDDED
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, text)| (*text).to_string())
            .ok_or_else(|| ProfileError::Unknown(id.to_string()))
    }

    fn available(&self) -> Vec<String> {
        builtin_ids().iter().map(|id| (*id).to_string()).collect()
    }
}

fn builtin_cache() -> &'static HashMap<&'static str, LanguageProfile> {
    static CACHE: OnceLock<HashMap<&'static str, LanguageProfile>> = OnceLock::new();
    CACHE.get_or_init(|| {
        EMBEDDED
            .iter()
            .map(|(id, text)| {
                let profile = LanguageProfile::from_toml_str(Some(id), text)
                    .expect("embedded profile documents are validated by tests");
                (*id, profile)
            })
            .collect()
    })
}

/// Returns the embedded profile for `id` without copying
pub fn builtin(id: &str) -> ProfileResult<&'static LanguageProfile> {
    builtin_cache()
        .get(id)
        .ok_or_else(|| ProfileError::Unknown(id.to_string()))
}

/// Ids of the embedded profiles
pub fn builtin_ids() -> Vec<&'static str> {
    EMBEDDED.iter().map(|(id, _)| *id).collect()
}

/// Resolves a profile from `source`, then merges `overrides` over it.
///
/// The merged document is validated again, so an override cannot smuggle
/// in a document the loader would have rejected.
pub fn resolve(
    source: &dyn ProfileSource,
    id: &str,
    overrides: Option<&toml::Table>,
) -> ProfileResult<LanguageProfile> {
    let text = source.load(id)?;
    let base = LanguageProfile::from_toml_str(Some(id), &text)?;
    match overrides {
        Some(table) if !table.is_empty() => base.merged_with(table),
        _ => Ok(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_embedded_profile_parses() {
        for id in builtin_ids() {
            let profile = builtin(id).unwrap();
            assert_eq!(profile.id(), id);
            assert!(!profile.label().is_empty());
        }
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        assert!(matches!(builtin("xx-XX"), Err(ProfileError::Unknown(_))));
        assert!(matches!(
            EmbeddedProfiles.load("xx-XX"),
            Err(ProfileError::Unknown(_))
        ));
    }

    #[test]
    fn test_resolve_without_overrides_matches_builtin() {
        let resolved = resolve(&EmbeddedProfiles, "fr-FR", None).unwrap();
        assert_eq!(resolved.id(), "fr-FR");
        assert_eq!(
            resolved.as_table(),
            builtin("fr-FR").unwrap().as_table()
        );
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let overrides: toml::Table =
            toml::from_str("[dashes]\nincise = \"—\"\ndemote_cadratin = false").unwrap();
        let resolved = resolve(&EmbeddedProfiles, "fr-FR", Some(&overrides)).unwrap();
        assert_eq!(resolved.dashes.incise, "—");
        assert!(!resolved.dashes.demote_cadratin);
        // Untouched groups come from the base document.
        assert_eq!(resolved.numbers.decimal_separator, ",");
    }

    #[test]
    fn test_resolve_rejects_overrides_that_break_validation() {
        let overrides: toml::Table = toml::from_str("[dashes]\nincise = \"\"").unwrap();
        assert!(resolve(&EmbeddedProfiles, "fr-FR", Some(&overrides)).is_err());
    }

    #[test]
    fn test_unknown_profile_groups_survive_override_merge() {
        let overrides: toml::Table =
            toml::from_str("[hyphenation]\nmin_word = 6").unwrap();
        let resolved = resolve(&EmbeddedProfiles, "fr-FR", Some(&overrides)).unwrap();
        assert!(resolved.as_table().contains_key("hyphenation"));
    }
}
