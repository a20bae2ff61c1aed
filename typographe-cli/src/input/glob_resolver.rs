//! Input pattern resolution
//!
//! Every input argument is treated as a glob pattern; a plain path is the
//! degenerate pattern matching itself. Directories are skipped, the final
//! list is sorted and deduplicated so runs are deterministic regardless of
//! argument order.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glob::glob;

use crate::error::CliError;

/// Expands the input patterns to the list of files a run will process
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern)
            .map_err(|e| CliError::InvalidPattern(format!("{pattern}: {e}")))?;

        let mut matched_any = false;
        for entry in paths {
            let path = entry.with_context(|| format!("Error resolving pattern: {pattern}"))?;
            if path.is_file() {
                files.push(path);
                matched_any = true;
            }
        }
        if !matched_any {
            log::warn!("pattern matched no files: {pattern}");
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files found matching the provided patterns");
    }

    files.sort();
    files.dedup();
    Ok(files)
}
