//! Fix command implementation

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::commands::{
    correct_files, open_session, warn_diagnostics, DocumentRun, EngineArgs, Session,
};
use crate::error::{CliError, CliResult};
use crate::input::{resolve_patterns, FileReader};
use crate::output::{FileReport, JsonFormatter, OutputFormatter, TextFormatter};

/// Arguments for the fix command
#[derive(Debug, Args)]
pub struct FixArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Rewrite each input file in place
    #[arg(long)]
    pub in_place: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Corrected text only
    Text,
    /// JSON reports carrying text, spans, and diagnostics
    Json,
}

impl FixArgs {
    /// Execute the fix command
    pub fn execute(&self) -> CliResult<i32> {
        self.engine.init_logging();
        log::debug!("arguments: {self:?}");
        self.check_usage()?;

        let session = open_session(&self.engine)?;

        if self.engine.input.is_empty() {
            return self.fix_stdin(&session);
        }

        let files = resolve_patterns(&self.engine.input)?;
        if self.output.is_some() && files.len() > 1 {
            return Err(CliError::UsageError(
                "--output accepts a single input file; use --in-place for file sets".to_string(),
            )
            .into());
        }

        let runs = correct_files(
            &session.corrector,
            &files,
            self.engine.jobs,
            self.engine.quiet,
        )?;

        if self.in_place {
            return self.write_in_place(&runs);
        }

        let mut formatter = self.formatter()?;
        for run in runs {
            let name = run.path.display().to_string();
            warn_diagnostics(&name, &run.correction);
            let report = FileReport::new(
                name,
                &run.original,
                run.correction,
                session.config.role_map(),
            );
            formatter.write_report(report)?;
        }
        formatter.finish()?;
        Ok(0)
    }

    fn check_usage(&self) -> CliResult<()> {
        if self.in_place && self.engine.input.is_empty() {
            return Err(CliError::UsageError(
                "--in-place needs file inputs; stdin cannot be rewritten".to_string(),
            )
            .into());
        }
        if self.in_place && self.format == OutputFormat::Json {
            return Err(CliError::UsageError(
                "--in-place writes corrected text and cannot be combined with --format json"
                    .to_string(),
            )
            .into());
        }
        Ok(())
    }

    fn fix_stdin(&self, session: &Session) -> CliResult<i32> {
        let original = io::read_to_string(io::stdin()).context("Failed to read stdin")?;
        let correction = session
            .corrector
            .correct(&original)
            .context("Failed to correct stdin")?;
        warn_diagnostics("-", &correction);

        let report = FileReport::new(
            "-".to_string(),
            &original,
            correction,
            session.config.role_map(),
        );
        let mut formatter = self.formatter()?;
        formatter.write_report(report)?;
        formatter.finish()?;
        Ok(0)
    }

    fn write_in_place(&self, runs: &[DocumentRun]) -> CliResult<i32> {
        let mut rewritten = 0usize;
        for run in runs {
            let name = run.path.display().to_string();
            warn_diagnostics(&name, &run.correction);
            if run.correction.changed(&run.original) {
                FileReader::write_back(&run.path, &run.correction.text)?;
                rewritten += 1;
                log::info!("rewrote {name}");
            } else {
                log::debug!("unchanged {name}");
            }
        }
        log::info!("{rewritten} of {} files rewritten", runs.len());
        Ok(0)
    }

    fn formatter(&self) -> CliResult<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?),
            None => Box::new(io::stdout()),
        };
        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        })
    }
}
