//! Reporters: sinks for finished BER curves

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::experiment::ExperimentResult;

/// Consumer of a finished experiment
pub trait Reporter {
    /// Render `result`
    fn report(&mut self, result: &ExperimentResult) -> Result<()>;
}

/// Output formats
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Table,
    Csv,
    Json,
}

/// Build the reporter for `format` writing to `writer`
pub fn reporter_for<'a>(format: ReportFormat, writer: Box<dyn Write + 'a>) -> Box<dyn Reporter + 'a> {
    match format {
        ReportFormat::Table => Box::new(TableReporter::new(writer)),
        ReportFormat::Csv => Box::new(CsvReporter::new(writer)),
        ReportFormat::Json => Box::new(JsonReporter::new(writer)),
    }
}

/// Aligned text table, one row per SNR
pub struct TableReporter<W: Write> {
    writer: W,
}

impl<W: Write> TableReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Reporter for TableReporter<W> {
    fn report(&mut self, result: &ExperimentResult) -> Result<()> {
        write!(self.writer, "{:>10}", "SNR (dB)")?;
        for scheme in result.schemes() {
            write!(self.writer, " {:>10}", scheme.name())?;
        }
        writeln!(self.writer)?;

        for (snr, bers) in result.rows() {
            write!(self.writer, "{:>10.1}", snr)?;
            for ber in bers {
                write!(self.writer, " {:>10.4}", ber)?;
            }
            writeln!(self.writer)?;
        }

        self.writer.flush().context("Failed to flush table output")
    }
}

/// Comma-separated values with a `snr_db` column
pub struct CsvReporter<W: Write> {
    writer: W,
}

impl<W: Write> CsvReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Reporter for CsvReporter<W> {
    fn report(&mut self, result: &ExperimentResult) -> Result<()> {
        let header: Vec<&str> = std::iter::once("snr_db")
            .chain(result.schemes().map(|s| s.name()))
            .collect();
        writeln!(self.writer, "{}", header.join(","))?;

        for (snr, bers) in result.rows() {
            let row: Vec<String> = std::iter::once(snr.to_string())
                .chain(bers.iter().map(|ber| ber.to_string()))
                .collect();
            writeln!(self.writer, "{}", row.join(","))?;
        }

        self.writer.flush().context("Failed to flush CSV output")
    }
}

/// Pretty-printed JSON of the whole result
pub struct JsonReporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, result: &ExperimentResult) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, result)
            .context("Failed to serialize experiment result")?;
        writeln!(self.writer)?;
        self.writer.flush().context("Failed to flush JSON output")
    }
}
