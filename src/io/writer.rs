//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Stream compression
//! - Output directory creation
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use cardsheet::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save_with_stats(doc, Path::new("output/output.pdf"))?;
//! println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{CardSheetError, Result};
use crate::utils::format_file_size;

/// Buffer size for writing (in bytes).
const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes finished documents to disk.
///
/// Streams are compressed before writing, except those that opt out
/// (embedded JPEG data). Missing parent directories are created.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// The document goes to `<name>.tmp` next to the target and is renamed
    /// into place; a failed write removes the temporary file and leaves any
    /// previous document untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output directory cannot be created
    /// - The file cannot be created (permissions, read-only filesystem)
    /// - Writing or renaming fails
    pub fn save_with_stats(&self, mut doc: Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CardSheetError::FailedToCreateOutput {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        doc.compress();

        let write_path = path.with_extension("tmp");
        if let Err(err) = self.write_file(&mut doc, &write_path) {
            let _ = fs::remove_file(&write_path);
            return Err(err);
        }

        fs::rename(&write_path, path).map_err(|e| {
            let _ = fs::remove_file(&write_path);
            CardSheetError::FailedToWrite {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        let write_time = start.elapsed();
        let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        debug!(
            "Wrote {} ({}) in {:?}",
            path.display(),
            format_file_size(file_size),
            write_time
        );

        Ok(WriteStatistics {
            write_time,
            file_size,
            output_path: path.to_path_buf(),
        })
    }

    fn write_file(&self, doc: &mut Document, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| CardSheetError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

        doc.save_to(&mut writer)
            .map_err(|e| CardSheetError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;

        writer.flush().map_err(|e| CardSheetError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Check if output file exists.
    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
