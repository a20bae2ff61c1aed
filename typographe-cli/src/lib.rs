//! Typographe CLI library
//!
//! This library provides the command-line interface for the typographe
//! typographic correction engine.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod profile_source;
pub mod progress;

pub use error::{CliError, CliResult};
