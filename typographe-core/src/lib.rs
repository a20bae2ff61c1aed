//! Locale-aware typographic correction engine
//!
//! This crate turns typescript conventions into typographic ones: straight
//! quotes into the locale's glyphs, hyphens between numbers into en dashes,
//! missing no-break spaces into the right space class, ordinals and century
//! numerals into their superscripted notation. Corrections are driven
//! entirely by a [`profile::LanguageProfile`]; the engine itself carries no
//! locale knowledge beyond what a profile declares.
//!
//! # Architecture
//!
//! Text flows through a fixed registry of passes ([`pass::registry`]), each
//! a pure function of `(text, profile)`. The [`pipeline::Pipeline`] runs
//! the enabled subset in rank order, guards iterative passes against
//! non-termination, and remaps the style spans every pass emits so the
//! final [`output::Correction`] addresses the final text. Passes that need
//! a placeholder protect it through the [`marker::MarkerCodec`], whose
//! tokens are verified absent from the input before use.
//!
//! # Example
//!
//! ```rust
//! use typographe_core::Corrector;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let corrector = Corrector::with_profile("fr-FR")?;
//! let result = corrector.correct("Il arrive au 19e siecle !")?;
//! assert_eq!(result.text, "Il arrive au XIXe\u{a0}siecle\u{202f}!");
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod error;
pub mod guard;
pub mod marker;
pub mod output;
pub mod pass;
pub mod pipeline;
pub mod profile;
pub mod rewrite;
pub mod style;

pub use cancel::CancelToken;
pub use error::{PipelineError, ProfileError, ProfileResult, StyleError};
pub use guard::{GuardState, LoopGuard, DEFAULT_MAX_ITERATIONS};
pub use marker::MarkerCodec;
pub use output::{Correction, Diagnostic, DiagnosticKind};
pub use pass::{registry, Convergence, PassCategory, PassId, PassSpec};
pub use pipeline::Pipeline;
pub use profile::{builtin, builtin_ids, resolve, EmbeddedProfiles, LanguageProfile, ProfileSource};
pub use style::{
    materialize, materialize_lossy, Span, StyleApplication, StyleRole, StyleRoleMap, StyledSpan,
};

/// Profile used when the caller does not pick one
pub const DEFAULT_PROFILE: &str = "fr-FR";

/// Ready-to-use correction front end.
///
/// Bundles a resolved profile, an enabled-pass set, and a pipeline so that
/// callers correcting many segments do not rebuild them per call.
#[derive(Debug)]
pub struct Corrector {
    profile: LanguageProfile,
    enabled: Vec<PassId>,
    pipeline: Pipeline,
}

impl Corrector {
    /// Creates a corrector for the default profile with every pass enabled
    pub fn new() -> Self {
        Self::with_profile(DEFAULT_PROFILE).expect("the default profile is embedded and valid")
    }

    /// Creates a corrector for an embedded profile with every pass enabled
    pub fn with_profile(id: &str) -> ProfileResult<Self> {
        CorrectorBuilder::new().profile(id).build()
    }

    pub fn builder() -> CorrectorBuilder {
        CorrectorBuilder::new()
    }

    /// The resolved profile this corrector applies
    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// The passes a run may execute, in registry order
    pub fn enabled_passes(&self) -> &[PassId] {
        &self.enabled
    }

    /// Corrects one text segment
    pub fn correct(&self, text: &str) -> Result<Correction, PipelineError> {
        self.pipeline.run(text, &self.profile, &self.enabled, None)
    }

    /// Corrects one text segment, observing `cancel` between passes
    pub fn correct_with_cancel(
        &self,
        text: &str,
        cancel: &CancelToken,
    ) -> Result<Correction, PipelineError> {
        self.pipeline
            .run(text, &self.profile, &self.enabled, Some(cancel))
    }
}

impl Default for Corrector {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures and builds a [`Corrector`].
///
/// The profile comes from the embedded set unless a [`ProfileSource`] is
/// supplied; an override fragment, when present, merges over the loaded
/// document before validation.
pub struct CorrectorBuilder {
    profile_id: String,
    source: Option<Box<dyn ProfileSource>>,
    overrides: Option<toml::Table>,
    passes: Option<Vec<PassId>>,
    max_iterations: Option<usize>,
}

impl CorrectorBuilder {
    pub fn new() -> Self {
        Self {
            profile_id: DEFAULT_PROFILE.to_string(),
            source: None,
            overrides: None,
            passes: None,
            max_iterations: None,
        }
    }

    /// Selects the profile to resolve
    pub fn profile(mut self, id: impl Into<String>) -> Self {
        self.profile_id = id.into();
        self
    }

    /// Resolves the profile through `source` instead of the embedded set
    pub fn source(mut self, source: impl ProfileSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Merges an override fragment over the loaded profile document
    pub fn overrides(mut self, fragment: toml::Table) -> Self {
        self.overrides = Some(fragment);
        self
    }

    /// Restricts the run to the given passes; registry order still applies
    pub fn passes(mut self, passes: impl IntoIterator<Item = PassId>) -> Self {
        self.passes = Some(passes.into_iter().collect());
        self
    }

    /// Caps iterate-to-fixpoint passes at `bound` iterations
    pub fn max_iterations(mut self, bound: usize) -> Self {
        self.max_iterations = Some(bound);
        self
    }

    pub fn build(self) -> ProfileResult<Corrector> {
        let profile = match &self.source {
            Some(source) => resolve(source.as_ref(), &self.profile_id, self.overrides.as_ref())?,
            None => resolve(&EmbeddedProfiles, &self.profile_id, self.overrides.as_ref())?,
        };
        let mut pipeline = Pipeline::new();
        if let Some(bound) = self.max_iterations {
            pipeline = pipeline.with_max_iterations(bound);
        }
        Ok(Corrector {
            profile,
            enabled: self.passes.unwrap_or_else(PassId::all),
            pipeline,
        })
    }
}

impl Default for CorrectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
