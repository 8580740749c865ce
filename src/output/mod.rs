//! Output formatting and display for cardsheet.
//!
//! This module handles all user-facing output:
//! - The validation summary printed before packing
//! - The page plan shown by dry runs
//! - The final write report
//! - The machine-readable JSON report
//!
//! Diagnostic logging goes through `tracing` instead and is configured in
//! the binary.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use serde::Serialize;
use std::path::PathBuf;

use crate::collect::BatchSummary;
use crate::error::{CardSheetError, Result};
use crate::io::WriteStatistics;
use crate::layout::Page;

/// Machine-readable summary of a run, printed with `--json` in place of
/// the human summary, before anything is packed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport<'a> {
    /// Tool version.
    pub version: &'static str,
    /// Validation outcome.
    pub summary: &'a BatchSummary,
    /// Number of pages the accepted images fill.
    pub pages: usize,
    /// Target document, absent when nothing was accepted.
    pub output: Option<PathBuf>,
    /// Whether this is a dry run.
    pub dry_run: bool,
}

impl<'a> RunReport<'a> {
    /// Build a report.
    pub fn new(
        summary: &'a BatchSummary,
        pages: usize,
        output: Option<PathBuf>,
        dry_run: bool,
    ) -> Self {
        Self {
            version: crate::VERSION,
            summary,
            pages,
            output,
            dry_run,
        }
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Print the report on stdout.
///
/// # Errors
///
/// Returns an error if the report cannot be encoded.
pub fn print_report(report: &RunReport<'_>) -> Result<()> {
    let json = report
        .to_json()
        .map_err(|e| CardSheetError::other(format!("Failed to encode report: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Display the validation summary: candidates, acceptances, and every
/// rejection with its reason.
///
/// Rejections are warnings, so they still reach stderr in quiet mode.
pub fn display_batch_summary(formatter: &OutputFormatter, summary: &BatchSummary) {
    formatter.info(&format!(
        "Scanned {} image(s): {} accepted, {} rejected",
        summary.total_candidates,
        summary.accepted.len(),
        summary.rejected.len()
    ));

    if !summary.missing_dirs.is_empty() {
        formatter.info(&format!(
            "Skipped {} missing input director{}",
            summary.missing_dirs.len(),
            if summary.missing_dirs.len() == 1 { "y" } else { "ies" }
        ));
    }

    if !summary.rejected.is_empty() {
        formatter.section("Rejected:");
        for rejection in &summary.rejected {
            formatter.warning(&format!(
                "{}: {}",
                rejection.path.display(),
                rejection.reason
            ));
        }
    }

    if formatter.is_verbose() {
        for path in &summary.accepted {
            formatter.debug(&format!("Accepted {}", path.display()));
        }
    }
}

/// Display the planned pages of a dry run.
pub fn display_plan(formatter: &OutputFormatter, pages: &[Page], output: &std::path::Path) {
    formatter.section("Dry run, no document written");
    formatter.info(&format!(
        "Would write {} page(s) to {}",
        pages.len(),
        output.display()
    ));
    for page in pages {
        formatter.list_item(&format!("Page {}: {} card(s)", page.number, page.len()));
        for placed in &page.images {
            formatter.detail(
                &format!("row {} col {}", placed.row + 1, placed.column + 1),
                &placed.path.display().to_string(),
            );
        }
    }
}

/// Display the result of writing the document.
pub fn display_write_statistics(formatter: &OutputFormatter, pages: usize, stats: &WriteStatistics) {
    formatter.success(&format!(
        "Wrote {} page(s) to {}",
        pages,
        stats.output_path.display()
    ));
    formatter.detail("Size", &stats.format_file_size());
    formatter.detail("Time", &format!("{:.2}s", stats.write_time.as_secs_f64()));
}
