//! Document reading and write-back

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// UTF-8 document access for the fix and check commands
pub struct FileReader;

impl FileReader {
    /// Reads a document as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Replaces a document's content, for `--in-place` runs.
    ///
    /// The write goes through a sibling temp file and a rename, so an
    /// interrupted run leaves the original document intact.
    pub fn write_back(path: &Path, text: &str) -> Result<()> {
        let tmp = path.with_extension("typographe.tmp");
        fs::write(&tmp, text)
            .with_context(|| format!("Failed to write temp file: {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_round_trips_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        let content = "Ellipse… «\u{a0}très\u{a0}» 1\u{202f}234";
        fs::write(&path, content).unwrap();

        assert_eq!(FileReader::read_text(&path).unwrap(), content);
    }

    #[test]
    fn test_read_text_missing_file_reports_path() {
        let err = FileReader::read_text(Path::new("/no/such/doc.txt")).unwrap_err();
        assert!(err.to_string().contains("/no/such/doc.txt"));
    }

    #[test]
    fn test_write_back_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "before").unwrap();

        FileReader::write_back(&path, "after").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "after");
        assert!(
            !path.with_extension("typographe.tmp").exists(),
            "temp file must not be left behind"
        );
    }

    #[test]
    fn test_write_back_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.txt");
        FileReader::write_back(&path, "text").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "text");
    }
}
