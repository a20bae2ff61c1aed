//! CLI command implementations

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use rayon::prelude::*;
use typographe_core::{Correction, Corrector, PassId};

use crate::config::UserConfig;
use crate::error::{CliError, CliResult};
use crate::input::FileReader;
use crate::profile_source::FileProfiles;
use crate::progress::ProgressReporter;

pub mod check;
pub mod fix;
pub mod generate_config;
pub mod list;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Correct documents and write the result
    Fix(fix::FixArgs),

    /// Report which documents a fix run would change, without writing
    Check(check::CheckArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Generate a starter configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List embedded language profiles
    Profiles,

    /// List correction passes in run order
    Passes,
}

/// Runs a parsed command and returns the process exit code
pub fn dispatch(command: Commands) -> CliResult<i32> {
    match command {
        Commands::Fix(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::List { subcommand } => list::execute(&subcommand),
        Commands::GenerateConfig(args) => args.execute(),
    }
}

/// Options shared by the fix and check commands
#[derive(Debug, Args)]
pub struct EngineArgs {
    /// Input files or patterns (supports glob); reads stdin when omitted
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Language profile to correct against
    #[arg(short, long, value_name = "ID")]
    pub profile: Option<String>,

    /// External profile file; may be given multiple times
    #[arg(long, value_name = "FILE")]
    pub profile_file: Vec<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "TYPOGRAPHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run only this pass; may be given multiple times
    #[arg(long = "pass", value_name = "PASS")]
    pub passes: Vec<PassId>,

    /// Drop this pass from the run; may be given multiple times
    #[arg(long = "skip-pass", value_name = "PASS")]
    pub skip_passes: Vec<PassId>,

    /// Worker threads for multi-file runs (default: all cores)
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl EngineArgs {
    /// Initialize logging based on verbosity level
    pub(crate) fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }
}

/// A resolved configuration plus the corrector built from it
#[derive(Debug)]
pub(crate) struct Session {
    pub config: UserConfig,
    pub corrector: Corrector,
}

/// Builds the session a fix or check run works with.
///
/// Flag precedence: `--profile` wins over the config file's `profile.id`,
/// which wins over the engine default. With `--profile-file` the profile is
/// resolved from those files instead of the embedded set; when no id is
/// given anywhere, the first id the files declare is used.
pub(crate) fn open_session(args: &EngineArgs) -> CliResult<Session> {
    let config = match &args.config {
        Some(path) => UserConfig::load(path)?,
        None => UserConfig::default(),
    };

    let profile_id = args.profile.clone().or_else(|| config.profile.id.clone());

    let mut builder = Corrector::builder();
    if args.profile_file.is_empty() {
        if let Some(id) = &profile_id {
            builder = builder.profile(id.clone());
        }
    } else {
        let source = FileProfiles::new(args.profile_file.clone());
        let id = match profile_id {
            Some(id) => id,
            None => source.first_declared_id().ok_or_else(|| {
                CliError::ConfigError(
                    "no profile file declares a meta.id; pass --profile to pick one".to_string(),
                )
            })?,
        };
        builder = builder.source(source).profile(id);
    }

    if let Some(overrides) = &config.profile.overrides {
        builder = builder.overrides(overrides.clone());
    }

    let selection = config.pass_selection(&args.passes, &args.skip_passes);
    if selection.is_empty() {
        log::warn!("every pass is disabled; documents will pass through unchanged");
    }
    builder = builder.passes(selection);

    let corrector = builder.build().context("Failed to load profile")?;
    log::info!(
        "profile {} with {} passes enabled",
        corrector.profile().id(),
        corrector.enabled_passes().len()
    );
    Ok(Session { config, corrector })
}

/// One corrected document
pub(crate) struct DocumentRun {
    pub path: PathBuf,
    pub original: String,
    pub correction: Correction,
}

/// Corrects every file on a worker pool, preserving input order
pub(crate) fn correct_files(
    corrector: &Corrector,
    files: &[PathBuf],
    jobs: Option<usize>,
    quiet: bool,
) -> CliResult<Vec<DocumentRun>> {
    let reporter = ProgressReporter::new(files.len(), quiet);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or_else(num_cpus::get))
        .build()
        .context("Failed to build worker pool")?;

    let results: Vec<CliResult<DocumentRun>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let original = FileReader::read_text(path)?;
                let correction = corrector
                    .correct(&original)
                    .with_context(|| format!("Failed to correct {}", path.display()))?;
                reporter.document_done(&path.display().to_string());
                Ok(DocumentRun {
                    path: path.clone(),
                    original,
                    correction,
                })
            })
            .collect()
    });
    reporter.finish();

    results.into_iter().collect()
}

/// Surfaces a correction's diagnostics in the log
pub(crate) fn warn_diagnostics(name: &str, correction: &Correction) {
    for diagnostic in &correction.diagnostics {
        log::warn!("{name}: [{}] {}", diagnostic.pass, diagnostic.detail);
    }
}
