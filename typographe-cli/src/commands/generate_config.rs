//! Generate config command implementation

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use typographe_core::{StyleRole, DEFAULT_PROFILE};

use crate::error::CliResult;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Profile id preset in the template
    #[arg(short, long, value_name = "ID", default_value = DEFAULT_PROFILE)]
    pub profile: String,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> CliResult<i32> {
        let template = self.template();

        match &self.output {
            Some(path) => {
                std::fs::write(path, template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                println!("✓ Configuration template written to {}", path.display());
                println!();
                println!("Next steps:");
                println!("1. Edit the [styles] section to name your host's character styles");
                println!("2. Check a document against it:");
                println!("   typographe check -c {} -i input.txt", path.display());
            }
            None => print!("{template}"),
        }
        Ok(0)
    }

    /// Generate template configuration content
    fn template(&self) -> String {
        let styles = StyleRole::all()
            .iter()
            .map(|role| format!("# {} = \"{}\"\n", role.id(), suggested_style(*role)))
            .collect::<String>();

        format!(
            r#"# typographe configuration
version = 1

[profile]
# Embedded profiles: see `typographe list profiles`
id = "{profile}"

# Overrides merge over the resolved profile document.
# [profile.overrides.numbers]
# group_threshold = 5

[passes]
# Restrict the run with `enabled`; omit it to run every pass
# (`typographe list passes` shows the full set).
# enabled = ["spacing", "quotes"]
disabled = []

[styles]
# Map abstract roles to the character styles of your host application.
# Unmapped roles are dropped from styled output and reported.
{styles}"#,
            profile = self.profile,
            styles = styles,
        )
    }
}

fn suggested_style(role: StyleRole) -> &'static str {
    match role {
        StyleRole::SuperscriptOrdinal | StyleRole::SuperscriptTitle => "Superscript",
        StyleRole::CenturyNumeral | StyleRole::SmallCaps => "SmallCaps",
        StyleRole::Italic => "Italic",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserConfig;

    #[test]
    fn test_template_parses_as_a_valid_config() {
        let args = GenerateConfigArgs {
            output: None,
            profile: "en-US".to_string(),
        };
        let template = args.template();

        let config: UserConfig = toml::from_str(&template).unwrap();
        assert_eq!(config.version, crate::config::SUPPORTED_VERSION);
        assert_eq!(config.profile.id.as_deref(), Some("en-US"));
        assert!(config.passes.enabled.is_none());
        assert!(config.styles.is_empty());
    }

    #[test]
    fn test_template_mentions_every_role() {
        let args = GenerateConfigArgs {
            output: None,
            profile: DEFAULT_PROFILE.to_string(),
        };
        let template = args.template();
        for role in StyleRole::all() {
            assert!(
                template.contains(role.id()),
                "template is missing role {role}"
            );
        }
    }

    #[test]
    fn test_execute_writes_a_loadable_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("typographe.toml");
        let args = GenerateConfigArgs {
            output: Some(path.clone()),
            profile: DEFAULT_PROFILE.to_string(),
        };

        assert_eq!(args.execute().unwrap(), 0);
        let config = UserConfig::load(&path).unwrap();
        assert_eq!(config.profile.id.as_deref(), Some(DEFAULT_PROFILE));
    }
}
