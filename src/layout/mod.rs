//! Page geometry and grid packing.
//!
//! Cards are placed on a fixed grid: `images_per_row` columns and
//! [`ROWS_PER_PAGE`] rows per A4 page. Rows and columns are counted from
//! the top-left of the page, while coordinates are PDF user space (origin
//! bottom-left, y up), so row `r` sits at
//! `page_height - margin - card_height - r * (card_height + spacing)`.
//!
//! Everything here is pure arithmetic; no file is ever opened.
//!
//! # Examples
//!
//! ```
//! use cardsheet::config::LayoutSettings;
//! use cardsheet::layout::{PageLayout, pack};
//! use std::path::PathBuf;
//!
//! let layout = PageLayout::from_settings(&LayoutSettings::default());
//! let images: Vec<PathBuf> = (0..10).map(|i| PathBuf::from(format!("{i}.png"))).collect();
//!
//! let pages = pack(&images, &layout);
//! assert_eq!(pages.len(), 2);
//! assert_eq!(pages[1].images.len(), 1);
//! ```

pub mod geometry;
pub mod packer;

pub use geometry::{Rect, fit_within};
pub use packer::{Page, PagePacker, PlacedImage, pack};

use serde::Serialize;

use crate::config::LayoutSettings;
use crate::units::{A4_HEIGHT_MM, A4_WIDTH_MM, CARD_HEIGHT_MM, CARD_WIDTH_MM, mm_to_pt};

/// Number of card rows on every page.
pub const ROWS_PER_PAGE: usize = 3;

/// Tolerance for the page-fit check, in points.
const FIT_EPSILON: f32 = 0.01;

/// Where a card lands: which page, which row and which column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridPosition {
    /// Zero-based page index.
    pub page: usize,
    /// Zero-based row, counted from the top.
    pub row: usize,
    /// Zero-based column, counted from the left.
    pub column: usize,
}

/// Fixed page geometry in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    /// Page width.
    pub page_width: f32,
    /// Page height.
    pub page_height: f32,
    /// Distance from the top and left edges to the grid.
    pub margin: f32,
    /// Gap between neighbouring cards.
    pub spacing: f32,
    /// Card box width.
    pub card_width: f32,
    /// Card box height.
    pub card_height: f32,
    /// Columns per row.
    pub images_per_row: usize,
    /// Rows per page.
    pub rows_per_page: usize,
}

impl PageLayout {
    /// Build the A4 layout for the given margin, spacing and column count.
    pub fn from_settings(settings: &LayoutSettings) -> Self {
        Self {
            page_width: mm_to_pt(A4_WIDTH_MM),
            page_height: mm_to_pt(A4_HEIGHT_MM),
            margin: mm_to_pt(settings.margin_mm),
            spacing: mm_to_pt(settings.spacing_mm),
            card_width: mm_to_pt(CARD_WIDTH_MM),
            card_height: mm_to_pt(CARD_HEIGHT_MM),
            images_per_row: settings.images_per_row,
            rows_per_page: ROWS_PER_PAGE,
        }
    }

    /// Cards per page.
    pub fn capacity(&self) -> usize {
        self.images_per_row * self.rows_per_page
    }

    /// Pages needed for `count` cards.
    pub fn page_count(&self, count: usize) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => count.div_ceil(capacity),
        }
    }

    /// Map a position in the accepted sequence to its grid cell.
    ///
    /// # Panics
    ///
    /// Panics if the layout has zero capacity; [`Config::validate`] rules
    /// that out.
    ///
    /// [`Config::validate`]: crate::config::Config::validate
    pub fn grid_position(&self, index: usize) -> GridPosition {
        let capacity = self.capacity();
        let slot = index % capacity;
        GridPosition {
            page: index / capacity,
            row: slot / self.images_per_row,
            column: slot % self.images_per_row,
        }
    }

    /// Card box for a row and column.
    pub fn cell_rect(&self, row: usize, column: usize) -> Rect {
        let x = self.margin + column as f32 * (self.card_width + self.spacing);
        let y = self.page_height
            - self.margin
            - self.card_height
            - row as f32 * (self.card_height + self.spacing);
        Rect::new(x, y, self.card_width, self.card_height)
    }

    /// Horizontal extent of a full row, margin included.
    pub fn grid_width(&self) -> f32 {
        let n = self.images_per_row as f32;
        self.margin + n * self.card_width + (n - 1.0).max(0.0) * self.spacing
    }

    /// Vertical extent of a full page of rows, margin included.
    pub fn grid_height(&self) -> f32 {
        let n = self.rows_per_page as f32;
        self.margin + n * self.card_height + (n - 1.0).max(0.0) * self.spacing
    }

    /// Whether a full grid stays on the page.
    ///
    /// Layouts that fail this still pack; cards simply overlap the edge.
    pub fn fits_page(&self) -> bool {
        self.grid_width() <= self.page_width + FIT_EPSILON
            && self.grid_height() <= self.page_height + FIT_EPSILON
    }
}
