//! Batch collection of candidate images.
//!
//! The [`Collector`] walks the direct entries of every configured input
//! directory, keeps the files whose extension is allowed, and runs each one
//! through the [`Validator`]. Directories are visited in configuration
//! order; within a directory entries follow filesystem order unless name
//! sorting is enabled. Nothing here aborts the batch: a missing directory
//! is logged and skipped, and a bad file becomes a rejection.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{Config, ImageSpecs};
use crate::error::CardSheetError;
use crate::utils::has_allowed_extension;
use crate::validation::{RejectReason, ValidationResult, Validator};

/// A file excluded from the layout, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    /// Path to the rejected file.
    pub path: PathBuf,
    /// Why it was rejected.
    pub reason: RejectReason,
}

/// Result of scanning and validating every input directory.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of files with an allowed extension that were validated.
    pub total_candidates: usize,

    /// Accepted images, in iteration order.
    pub accepted: Vec<PathBuf>,

    /// Rejected images with their reasons.
    pub rejected: Vec<Rejection>,

    /// Input directories that were skipped because they do not exist.
    pub missing_dirs: Vec<PathBuf>,
}

impl BatchSummary {
    /// Check if nothing was accepted.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    fn record(&mut self, path: PathBuf, result: ValidationResult) {
        self.total_candidates += 1;
        match result {
            ValidationResult::Accepted => {
                debug!("Accepted {}", path.display());
                self.accepted.push(path);
            }
            ValidationResult::Rejected(reason) => {
                info!("Rejected {}: {reason}", path.display());
                self.rejected.push(Rejection { path, reason });
            }
        }
    }
}

/// Scans input directories and validates what it finds.
#[derive(Debug)]
pub struct Collector<'a> {
    validator: Validator<'a>,
    extensions: &'a [String],
    sort_by_name: bool,
}

impl<'a> Collector<'a> {
    /// Create a collector from explicit settings.
    pub fn new(specs: &'a ImageSpecs, extensions: &'a [String], sort_by_name: bool) -> Self {
        Self {
            validator: Validator::new(specs),
            extensions,
            sort_by_name,
        }
    }

    /// Create a collector from a run configuration.
    pub fn from_config(config: &'a Config) -> Self {
        Self::new(&config.specs, &config.extensions, config.sort_by_name)
    }

    /// Scan and validate every directory, in order.
    pub fn collect(&self, dirs: &[PathBuf]) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for dir in dirs {
            if !dir.is_dir() {
                warn!("{}, skipping", CardSheetError::input_dir_not_found(dir.clone()));
                summary.missing_dirs.push(dir.clone());
                continue;
            }
            self.collect_dir(dir, &mut summary);
        }

        debug!(
            "Scanned {} candidates: {} accepted, {} rejected",
            summary.total_candidates,
            summary.accepted.len(),
            summary.rejected.len()
        );
        summary
    }

    fn collect_dir(&self, dir: &Path, summary: &mut BatchSummary) {
        let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);
        if self.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read entry in {}: {e}", dir.display());
                    continue;
                }
            };

            if !entry.file_type().is_file() || !has_allowed_extension(entry.path(), self.extensions)
            {
                continue;
            }

            let path = entry.into_path();
            let result = self.validator.validate(&path);
            summary.record(path, result);
        }
    }
}
