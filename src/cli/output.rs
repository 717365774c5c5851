//! Output formatting utilities for the conformance report.
//!
//! Everything is written through [`std::io::Write`] so the report can be
//! captured in tests; the binary points these helpers at stdout.

use std::io::{self, Write};

use chrono::NaiveDateTime;
use fanhub_conformance::{ApiBase, CheckResult, ConformanceError, RunSummary};

const RULE_WIDTH: usize = 60;
const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the run banner: target API and start time.
pub fn write_banner<W: Write>(
    writer: &mut W,
    api_base: &ApiBase,
    started_at: NaiveDateTime,
) -> Result<(), ConformanceError> {
    writeln!(writer, "Starting Fan Hub API conformance checks").map_err(|e| io_error(&e))?;
    writeln!(writer, "Testing API at: {}", api_base.as_str()).map_err(|e| io_error(&e))?;
    writeln!(writer, "Started at: {}", started_at.format(CLOCK_FORMAT))
        .map_err(|e| io_error(&e))?;
    write_rule(writer)
}

/// Streams one line per recorded result.
///
/// The suite reports results through an infallible callback, so the first
/// write error is held back and surfaced by [`ProgressWriter::finish`].
pub struct ProgressWriter<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> ProgressWriter<W> {
    /// Wraps a writer.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Writes a `PASS`/`FAIL` line, followed by the payload of failures.
    pub fn record(&mut self, result: &CheckResult) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = write_result(&mut self.writer, result) {
            self.error = Some(error);
        }
    }

    /// Returns the writer, or the first error seen while writing.
    pub fn finish(self) -> Result<W, ConformanceError> {
        self.error
            .map_or(Ok(self.writer), |error| Err(io_error(&error)))
    }
}

fn write_result<W: Write>(writer: &mut W, result: &CheckResult) -> io::Result<()> {
    let status = if result.success() { "PASS" } else { "FAIL" };
    writeln!(writer, "{status} {}: {}", result.name(), result.message())?;

    if result.success() {
        return Ok(());
    }
    if let Some(response) = result.response() {
        let pretty = serde_json::to_string_pretty(response).map_err(io::Error::other)?;
        writeln!(writer, "   Response: {pretty}")?;
    }
    Ok(())
}

/// Writes the closing summary and the list of failed checks.
pub fn write_summary<W: Write>(
    writer: &mut W,
    summary: &RunSummary,
    finished_at: NaiveDateTime,
) -> Result<(), ConformanceError> {
    write_rule(writer)?;
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "TEST SUMMARY").map_err(|e| io_error(&e))?;
    writeln!(writer, "Total Tests: {}", summary.total()).map_err(|e| io_error(&e))?;
    writeln!(writer, "Passed: {}", summary.passed()).map_err(|e| io_error(&e))?;
    writeln!(writer, "Failed: {}", summary.failed()).map_err(|e| io_error(&e))?;

    let rate = summary
        .success_rate()
        .map_or_else(|| "N/A".to_owned(), |rate| format!("{rate:.1}%"));
    writeln!(writer, "Success Rate: {rate}").map_err(|e| io_error(&e))?;

    if !summary.all_passed() {
        writeln!(writer).map_err(|e| io_error(&e))?;
        writeln!(writer, "FAILED TESTS:").map_err(|e| io_error(&e))?;
        for failure in summary.failures() {
            writeln!(writer, "  - {}: {}", failure.name(), failure.message())
                .map_err(|e| io_error(&e))?;
        }
    }

    if !summary.created_resources().is_empty() {
        writeln!(writer).map_err(|e| io_error(&e))?;
        writeln!(writer, "Created resources (not cleaned up):").map_err(|e| io_error(&e))?;
        for created in summary.created_resources() {
            writeln!(writer, "  - {}: {}", created.kind, created.id).map_err(|e| io_error(&e))?;
        }
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Testing completed at: {}",
        finished_at.format(CLOCK_FORMAT)
    )
    .map_err(|e| io_error(&e))
}

fn write_rule<W: Write>(writer: &mut W) -> Result<(), ConformanceError> {
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH)).map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`ConformanceError::Io`].
pub(crate) fn io_error(error: &io::Error) -> ConformanceError {
    ConformanceError::Io {
        message: error.to_string(),
    }
}
