//! JSON output
//!
//! Emits an array with one object per document: corrected text, resolved
//! style spans, and diagnostics. This is the machine-facing surface for
//! editors and build steps that apply the styles themselves.

use std::io::Write;

use anyhow::Result;

use super::{FileReport, OutputFormatter};

/// Collects reports and writes them as one pretty-printed JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    reports: Vec<FileReport>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            reports: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn write_report(&mut self, report: FileReport) -> Result<()> {
        self.reports.push(report);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.reports)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
