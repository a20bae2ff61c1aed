//! Layered error types
//!
//! Errors are split by concern: profile resolution, pipeline execution,
//! and style materialization. Anything that could leave text half-transformed
//! is fatal and raised before any mutation escapes the engine; single-concern
//! failures surface as diagnostics instead (see [`crate::output::Diagnostic`]).

use thiserror::Error;

/// Errors raised while resolving a language profile (Profile Layer)
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile source could not produce a document for this id
    #[error("profile source failed for '{id}': {reason}")]
    Load {
        /// The requested profile id
        id: String,
        /// Why the source could not deliver it
        reason: String,
    },

    /// No profile is registered under this id
    #[error("unknown profile: {0}")]
    Unknown(String),

    /// The document exists but is not a valid profile
    #[error("profile '{id}' is malformed: {reason}")]
    Parse {
        /// The profile id being parsed
        id: String,
        /// Parser message
        reason: String,
    },

    /// A required rule group is missing from the document
    #[error("profile '{id}' is missing required group '{group}'")]
    Validation {
        /// The profile id being validated
        id: String,
        /// The missing top-level group
        group: &'static str,
    },

    /// The document's declared id does not match the requested one
    #[error("profile id mismatch: requested '{requested}', document says '{declared}'")]
    IdMismatch {
        /// Id the caller asked for
        requested: String,
        /// Id found in the document's meta group
        declared: String,
    },
}

/// Errors raised while running the correction pipeline (Pipeline Layer)
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Decoding found marker-namespace content with no table entry.
    /// The segment's result is discarded; nothing has been written back.
    #[error("marker collision at byte {position}: namespace sequence has no table entry")]
    MarkerCollision {
        /// Byte offset of the orphaned namespace sequence
        position: usize,
    },

    /// Profile failure surfaced through the pipeline facade
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
}

/// Errors raised while materializing style spans (Style Layer)
#[derive(Debug, Error)]
pub enum StyleError {
    /// A span references a role the caller's role map does not define
    #[error("no style mapped for role '{role}'")]
    UnknownRole {
        /// The unmapped role id
        role: String,
    },
}

/// Result type for profile operations
pub type ProfileResult<T> = std::result::Result<T, ProfileError>;
