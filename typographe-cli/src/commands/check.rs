//! Check command implementation

use std::io;

use anyhow::Context;
use clap::Args;

use crate::commands::{correct_files, open_session, warn_diagnostics, EngineArgs};
use crate::error::CliResult;
use crate::input::resolve_patterns;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub engine: EngineArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Exit code 0 means every document is already clean, 1 means at least
    /// one would change under a fix run. Nothing is written.
    pub fn execute(&self) -> CliResult<i32> {
        self.engine.init_logging();
        log::debug!("arguments: {self:?}");

        let session = open_session(&self.engine)?;

        if self.engine.input.is_empty() {
            let original = io::read_to_string(io::stdin()).context("Failed to read stdin")?;
            let correction = session
                .corrector
                .correct(&original)
                .context("Failed to correct stdin")?;
            warn_diagnostics("-", &correction);
            let changed = correction.changed(&original);
            if !self.engine.quiet {
                println!("{}", verdict_line("-", changed));
            }
            return Ok(i32::from(changed));
        }

        let files = resolve_patterns(&self.engine.input)?;
        let runs = correct_files(
            &session.corrector,
            &files,
            self.engine.jobs,
            self.engine.quiet,
        )?;

        let mut changed = 0usize;
        for run in &runs {
            let name = run.path.display().to_string();
            warn_diagnostics(&name, &run.correction);
            let differs = run.correction.changed(&run.original);
            if differs {
                changed += 1;
            }
            if !self.engine.quiet {
                println!("{}", verdict_line(&name, differs));
            }
        }
        if !self.engine.quiet {
            println!("{changed} of {} documents would change", runs.len());
        }
        Ok(i32::from(changed > 0))
    }
}

fn verdict_line(name: &str, changed: bool) -> String {
    if changed {
        format!("would fix: {name}")
    } else {
        format!("clean: {name}")
    }
}
