//! Error handling for the CLI application

use std::fmt;

/// Errors the CLI raises itself, as opposed to errors surfaced from the core
#[derive(Debug)]
pub enum CliError {
    /// Invalid input file pattern
    InvalidPattern(String),
    /// The user configuration document is unusable
    ConfigError(String),
    /// Flags were combined in a way that has no meaning
    UsageError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::UsageError(msg) => write!(f, "Usage error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
