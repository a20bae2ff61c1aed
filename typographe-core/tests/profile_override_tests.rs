//! Profile resolution, override merging, and validation

use typographe_core::{
    builtin, builtin_ids, resolve, Corrector, EmbeddedProfiles, LanguageProfile, ProfileError,
    ProfileResult, ProfileSource,
};

fn fragment(text: &str) -> toml::Table {
    toml::from_str(text).unwrap()
}

#[test]
fn test_every_embedded_profile_resolves() {
    let ids = builtin_ids();
    assert!(ids.contains(&"fr-FR"));
    assert!(ids.contains(&"en-US"));
    for id in ids {
        let profile = builtin(id).unwrap();
        assert_eq!(profile.id(), id);
        assert!(!profile.label().is_empty());
    }
}

#[test]
fn test_override_replaces_leaf_and_keeps_siblings() {
    let overrides = fragment("[numbers]\ngroup_threshold = 6");
    let profile = resolve(&EmbeddedProfiles, "fr-FR", Some(&overrides)).unwrap();

    assert_eq!(profile.numbers.group_threshold, 6);
    assert_eq!(profile.numbers.decimal_separator, ",");
    assert_eq!(profile.id(), "fr-FR");
    assert_eq!(profile.label(), "Français (France)");
}

#[test]
fn test_override_changes_engine_behavior() {
    let relaxed = Corrector::builder()
        .profile("fr-FR")
        .overrides(fragment("[numbers]\ngroup_threshold = 6"))
        .build()
        .unwrap();
    assert_eq!(relaxed.correct("12345 pages").unwrap().text, "12345 pages");

    let stock = Corrector::with_profile("fr-FR").unwrap();
    assert_eq!(
        stock.correct("12345 pages").unwrap().text,
        "12\u{202f}345 pages"
    );
}

#[test]
fn test_unknown_group_in_override_is_preserved() {
    let overrides = fragment("[phrases]\nmin_words = 3");
    let profile = resolve(&EmbeddedProfiles, "fr-FR", Some(&overrides)).unwrap();
    assert!(profile.as_table().contains_key("phrases"));
}

#[test]
fn test_breaking_override_is_rejected_on_revalidation() {
    let overrides = fragment("[quotes]\nlevels = []");
    let err = resolve(&EmbeddedProfiles, "fr-FR", Some(&overrides)).unwrap_err();
    assert!(matches!(err, ProfileError::Parse { .. }), "got {err:?}");
}

#[test]
fn test_missing_required_group_is_rejected() {
    let doc = "[meta]\nid = \"xx\"\nlabel = \"Test\"";
    let err = LanguageProfile::from_toml_str(Some("xx"), doc).unwrap_err();
    assert!(
        matches!(err, ProfileError::Validation { group: "punctuation", .. }),
        "got {err:?}"
    );
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let err = LanguageProfile::from_toml_str(Some("xx"), "not toml [[").unwrap_err();
    assert!(matches!(err, ProfileError::Parse { .. }), "got {err:?}");
}

#[test]
fn test_declared_id_must_match_requested() {
    let text = EmbeddedProfiles.load("fr-FR").unwrap();
    let err = LanguageProfile::from_toml_str(Some("en-US"), &text).unwrap_err();
    assert!(matches!(err, ProfileError::IdMismatch { .. }), "got {err:?}");
}

/// Source serving a Swiss French variant derived from the embedded document.
struct SingleDoc;

impl ProfileSource for SingleDoc {
    fn load(&self, id: &str) -> ProfileResult<String> {
        if id == "fr-CH" {
            let text = EmbeddedProfiles.load("fr-FR").unwrap();
            Ok(text.replace("id = \"fr-FR\"", "id = \"fr-CH\""))
        } else {
            Err(ProfileError::Unknown(id.to_string()))
        }
    }

    fn available(&self) -> Vec<String> {
        vec!["fr-CH".to_string()]
    }
}

#[test]
fn test_custom_source_feeds_the_builder() {
    let corrector = Corrector::builder()
        .profile("fr-CH")
        .source(SingleDoc)
        .build()
        .unwrap();
    assert_eq!(corrector.profile().id(), "fr-CH");
}

#[test]
fn test_custom_source_rejects_ids_it_cannot_load() {
    let err = Corrector::builder()
        .profile("fr-BE")
        .source(SingleDoc)
        .build()
        .unwrap_err();
    assert!(matches!(err, ProfileError::Unknown(id) if id == "fr-BE"));
}
