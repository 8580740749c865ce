//! End-to-end sheet building.
//!
//! [`build_sheet`] runs the whole pipeline for one [`Config`]:
//!
//! 1. Scan the input directories and validate every candidate
//! 2. Print the validation summary, or the JSON report with `--json`
//! 3. Pack the accepted images into pages
//! 4. Draw the pages and write `<output_dir>/output.pdf`
//!
//! A run with no accepted images fails with
//! [`CardSheetError::NoAcceptedImages`] and leaves no file behind.

use std::path::PathBuf;
use tracing::{info, warn};

use crate::collect::{BatchSummary, Collector};
use crate::config::{Config, OverwriteMode};
use crate::error::{CardSheetError, Result};
use crate::io::{PdfWriter, WriteStatistics};
use crate::layout::{Page, PagePacker, pack};
use crate::output::{
    OutputFormatter, RunReport, display_batch_summary, display_plan, display_write_statistics,
    print_report,
};
use crate::render::SheetRenderer;
use crate::units::pt_to_mm;

/// What a run produced.
#[derive(Debug)]
pub enum SheetOutcome {
    /// Dry run: the pages that would be written.
    DryRun {
        /// Validation outcome.
        summary: BatchSummary,
        /// Planned pages.
        pages: Vec<Page>,
        /// Where the document would go.
        output_path: PathBuf,
    },

    /// The document was written.
    Written {
        /// Validation outcome.
        summary: BatchSummary,
        /// Number of pages in the document.
        page_count: usize,
        /// Write statistics.
        stats: WriteStatistics,
    },
}

impl SheetOutcome {
    /// Validation outcome of the run.
    pub fn summary(&self) -> &BatchSummary {
        match self {
            Self::DryRun { summary, .. } | Self::Written { summary, .. } => summary,
        }
    }

    /// Pages planned or written.
    pub fn page_count(&self) -> usize {
        match self {
            Self::DryRun { pages, .. } => pages.len(),
            Self::Written { page_count, .. } => *page_count,
        }
    }

    /// Path of the written document, `None` for dry runs.
    pub fn written_path(&self) -> Option<&PathBuf> {
        match self {
            Self::DryRun { .. } => None,
            Self::Written { stats, .. } => Some(&stats.output_path),
        }
    }
}

/// Validate inputs and build the printable document.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - No image was accepted
/// - The output exists and overwriting is disabled
/// - An accepted image can no longer be drawn
/// - The document cannot be written
pub fn build_sheet(config: &Config, formatter: &OutputFormatter) -> Result<SheetOutcome> {
    config.validate()?;

    let layout = config.page_layout();
    if !layout.fits_page() {
        let message = format!(
            "Grid of {} x {} cards needs {:.1}mm x {:.1}mm and runs off the A4 page",
            layout.images_per_row,
            layout.rows_per_page,
            pt_to_mm(layout.grid_width()),
            pt_to_mm(layout.grid_height()),
        );
        warn!("{message}");
        formatter.warning(&message);
    }

    let dirs = config.resolved_input_dirs();
    formatter.info(&format!("Scanning {} input folder(s)", dirs.len()));
    let summary = Collector::from_config(config).collect(&dirs);
    let output_path = config.output_path();

    if config.json {
        let report = RunReport::new(
            &summary,
            layout.page_count(summary.accepted.len()),
            (!summary.is_empty()).then(|| output_path.clone()),
            config.dry_run,
        );
        print_report(&report)?;
    } else {
        display_batch_summary(formatter, &summary);
    }

    if summary.is_empty() {
        return Err(CardSheetError::NoAcceptedImages);
    }

    if config.dry_run {
        let pages = pack(&summary.accepted, &layout);
        display_plan(formatter, &pages, &output_path);
        return Ok(SheetOutcome::DryRun {
            summary,
            pages,
            output_path,
        });
    }

    let writer = PdfWriter::new();
    if config.overwrite_mode == OverwriteMode::NoClobber && writer.exists(&output_path) {
        return Err(CardSheetError::output_exists(output_path));
    }

    let packer = PagePacker::new(&summary.accepted, &layout);
    info!(
        "Packing {} image(s) into {} page(s)",
        summary.accepted.len(),
        packer.len()
    );

    let sheet = SheetRenderer::new(&layout)
        .with_title(config.title.clone())
        .render(packer)?;
    let page_count = sheet.page_count;
    let stats = writer.save_with_stats(sheet.document, &output_path)?;
    display_write_statistics(formatter, page_count, &stats);

    Ok(SheetOutcome::Written {
        summary,
        page_count,
        stats,
    })
}
