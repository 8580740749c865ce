//! A candidate image opened for inspection.

use image::{ImageFormat, ImageReader};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use super::resolution::read_resolution;
use crate::error::{CardSheetError, Result};

/// An image file whose header has been decoded.
///
/// Only the header is read on open. Resolution metadata is fetched on the
/// first call to [`ImageCandidate::resolution`] and cached.
#[derive(Debug)]
pub struct ImageCandidate {
    path: PathBuf,
    format: Option<ImageFormat>,
    width: u32,
    height: u32,
    resolution: OnceCell<Option<u32>>,
}

impl ImageCandidate {
    /// Open an image and read its pixel dimensions.
    ///
    /// The format is sniffed from the file contents, so a misnamed file is
    /// still decoded correctly.
    ///
    /// # Errors
    ///
    /// Returns [`CardSheetError::ImageUnreadable`] if the file cannot be
    /// read or its header is not a supported image format.
    pub fn open(path: &Path) -> Result<Self> {
        let unreadable =
            |reason: String| CardSheetError::image_unreadable(path.to_path_buf(), reason);

        let reader = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| unreadable(e.to_string()))?;
        let format = reader.format();
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| unreadable(e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            format,
            width,
            height,
            resolution: OnceCell::new(),
        })
    }

    /// Path the candidate was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected container format.
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// Pixel dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Horizontal resolution in DPI, or `None` when the file has none.
    pub fn resolution(&self) -> Option<u32> {
        *self
            .resolution
            .get_or_init(|| read_resolution(&self.path, self.format))
    }
}
