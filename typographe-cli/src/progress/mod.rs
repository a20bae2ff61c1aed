//! Progress reporting for multi-document runs

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar shown while several documents are being corrected.
///
/// Single-document and quiet runs stay silent; the bar writes to stderr
/// so piped stdout output is never polluted.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Creates a reporter; the bar only appears for more than one document
    pub fn new(total: usize, quiet: bool) -> Self {
        if quiet || total < 2 {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} documents {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// Records one corrected document; callable from worker threads
    pub fn document_done(&self, name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(name.to_string());
            bar.inc(1);
        }
    }

    /// Closes the bar
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
