//! Plain text output

use std::io::{self, Write};

use anyhow::Result;

use super::{FileReport, OutputFormatter};

/// Writes corrected text exactly as produced, byte for byte.
///
/// Spans and diagnostics are not part of the text surface; the json
/// formatter carries those.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Formatter writing to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn write_report(&mut self, report: FileReport) -> Result<()> {
        self.writer.write_all(report.text.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
