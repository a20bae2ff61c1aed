//! User configuration document (`typographe.toml`)
//!
//! The document carries everything a run needs beyond the input text:
//! which profile to use, overrides on top of it, the pass set, and the
//! role-to-style mapping handed back with corrected text. Command-line
//! flags win over the document; the document wins over built-in defaults.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use typographe_core::{PassId, StyleRoleMap};

use crate::error::{CliError, CliResult};

/// The configuration format version this build understands
pub const SUPPORTED_VERSION: u32 = 1;

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

/// Parsed `typographe.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    /// Format version; bumped on breaking layout changes
    #[serde(default = "default_version")]
    pub version: u32,

    /// Profile selection and overrides
    #[serde(default)]
    pub profile: ProfileSection,

    /// Which passes run
    #[serde(default)]
    pub passes: PassSection,

    /// Role to host-style mapping used when materializing spans
    #[serde(default)]
    pub styles: StyleRoleMap,
}

/// `[profile]` section
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProfileSection {
    /// Profile id to resolve; falls back to the engine default
    #[serde(default)]
    pub id: Option<String>,

    /// Fragment merged over the resolved profile document
    #[serde(default)]
    pub overrides: Option<toml::Table>,
}

/// `[passes]` section
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PassSection {
    /// Restrict the run to these passes; `None` means the full registry
    #[serde(default)]
    pub enabled: Option<Vec<PassId>>,

    /// Passes removed from the run after `enabled` is applied
    #[serde(default)]
    pub disabled: Vec<PassId>,
}

impl UserConfig {
    /// Loads and validates a configuration document
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: UserConfig = toml::from_str(&text).map_err(|e| {
            CliError::ConfigError(format!("{}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.version != SUPPORTED_VERSION {
            return Err(CliError::ConfigError(format!(
                "unsupported config version {} (this build understands {})",
                self.version, SUPPORTED_VERSION
            ))
            .into());
        }
        Ok(())
    }

    /// The pass set for a run, in registry order.
    ///
    /// `only` (from repeated `--pass`) replaces the configured set;
    /// `skip` (from `--skip-pass`) and the configured `disabled` list are
    /// always subtracted.
    pub fn pass_selection(&self, only: &[PassId], skip: &[PassId]) -> Vec<PassId> {
        let base: Vec<PassId> = if !only.is_empty() {
            only.to_vec()
        } else if let Some(enabled) = &self.passes.enabled {
            enabled.clone()
        } else {
            PassId::all()
        };
        PassId::all()
            .into_iter()
            .filter(|id| base.contains(id))
            .filter(|id| !skip.contains(id))
            .filter(|id| !self.passes.disabled.contains(id))
            .collect()
    }

    /// The role map handed to span materialization
    pub fn role_map(&self) -> &StyleRoleMap {
        &self.styles
    }
}
