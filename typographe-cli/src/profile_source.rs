//! On-disk profile documents
//!
//! The engine only knows the [`ProfileSource`] trait; this is the CLI's
//! implementation of it for TOML files named on the command line. A file
//! is addressed by the id its own `meta.id` declares, so resolution stays
//! id-based whether a profile is embedded or external.

use std::path::{Path, PathBuf};

use typographe_core::{ProfileError, ProfileResult, ProfileSource};

/// Profile source backed by explicit files
#[derive(Debug, Clone, Default)]
pub struct FileProfiles {
    paths: Vec<PathBuf>,
}

impl FileProfiles {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The id declared by the first readable document, used when the user
    /// names a file but no profile id
    pub fn first_declared_id(&self) -> Option<String> {
        self.paths
            .iter()
            .find_map(|path| declared_id_of(path).ok().flatten())
    }
}

impl ProfileSource for FileProfiles {
    fn load(&self, id: &str) -> ProfileResult<String> {
        for path in &self.paths {
            let text = read_profile(path, id)?;
            match declared_id(&text) {
                Some(declared) if declared == id => return Ok(text),
                _ => continue,
            }
        }
        Err(ProfileError::Unknown(id.to_string()))
    }

    fn available(&self) -> Vec<String> {
        self.paths
            .iter()
            .filter_map(|path| declared_id_of(path).ok().flatten())
            .collect()
    }
}

fn read_profile(path: &Path, id: &str) -> ProfileResult<String> {
    std::fs::read_to_string(path).map_err(|e| ProfileError::Load {
        id: id.to_string(),
        reason: format!("{}: {e}", path.display()),
    })
}

fn declared_id_of(path: &Path) -> ProfileResult<Option<String>> {
    let text = read_profile(path, "<file>")?;
    Ok(declared_id(&text))
}

fn declared_id(text: &str) -> Option<String> {
    let table: toml::Table = toml::from_str(text).ok()?;
    table
        .get("meta")?
        .as_table()?
        .get("id")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn profile_file(id: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        let text = typographe_core::EmbeddedProfiles
            .load("fr-FR")
            .unwrap()
            .replace("id = \"fr-FR\"", &format!("id = \"{id}\""));
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_is_addressed_by_declared_id() {
        let file = profile_file("fr-CA");
        let source = FileProfiles::new(vec![file.path().to_path_buf()]);

        assert_eq!(source.available(), vec!["fr-CA".to_string()]);
        assert_eq!(source.first_declared_id().as_deref(), Some("fr-CA"));
        assert!(source.load("fr-CA").is_ok());
    }

    #[test]
    fn test_undeclared_id_is_unknown() {
        let file = profile_file("fr-CA");
        let source = FileProfiles::new(vec![file.path().to_path_buf()]);

        let err = source.load("de-DE").unwrap_err();
        assert!(matches!(err, ProfileError::Unknown(id) if id == "de-DE"));
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let source = FileProfiles::new(vec![PathBuf::from("/no/such/profile.toml")]);
        let err = source.load("fr-CA").unwrap_err();
        assert!(matches!(err, ProfileError::Load { .. }));
    }

    #[test]
    fn test_unparseable_file_has_no_declared_id() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not toml [[").unwrap();
        let source = FileProfiles::new(vec![file.path().to_path_buf()]);

        assert!(source.available().is_empty());
        assert!(matches!(
            source.load("fr-CA").unwrap_err(),
            ProfileError::Unknown(_)
        ));
    }
}
