//! Packing an ordered image list into pages.

use serde::Serialize;
use std::path::PathBuf;

use super::{PageLayout, Rect};

/// One image placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedImage {
    /// Source file.
    pub path: PathBuf,
    /// Position in the accepted sequence.
    pub index: usize,
    /// Zero-based row from the top.
    pub row: usize,
    /// Zero-based column from the left.
    pub column: usize,
    /// Card box on the page.
    pub rect: Rect,
}

/// A sealed page: up to `capacity` placed images in reading order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// One-based page number.
    pub number: usize,
    /// Placed images, left to right then top to bottom.
    pub images: Vec<PlacedImage>,
}

impl Page {
    /// Number of cards on this page.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the page holds no cards. Packed pages are never empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Lazily walks the accepted list and yields one sealed [`Page`] at a time.
///
/// Pages are filled strictly in input order; a new page starts only when
/// the current one is full and images remain.
pub struct PagePacker<'a> {
    images: &'a [PathBuf],
    layout: &'a PageLayout,
    cursor: usize,
}

impl<'a> PagePacker<'a> {
    /// Create a packer over `images`.
    pub fn new(images: &'a [PathBuf], layout: &'a PageLayout) -> Self {
        Self {
            images,
            layout,
            cursor: 0,
        }
    }
}

impl Iterator for PagePacker<'_> {
    type Item = Page;

    fn next(&mut self) -> Option<Page> {
        let capacity = self.layout.capacity();
        if capacity == 0 || self.cursor >= self.images.len() {
            return None;
        }

        let start = self.cursor;
        let end = (start + capacity).min(self.images.len());
        self.cursor = end;

        let images = self.images[start..end]
            .iter()
            .enumerate()
            .map(|(offset, path)| {
                let index = start + offset;
                let position = self.layout.grid_position(index);
                PlacedImage {
                    path: path.clone(),
                    index,
                    row: position.row,
                    column: position.column,
                    rect: self.layout.cell_rect(position.row, position.column),
                }
            })
            .collect();

        Some(Page {
            number: start / capacity + 1,
            images,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .layout
            .page_count(self.images.len().saturating_sub(self.cursor));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PagePacker<'_> {}

/// Pack all images at once.
pub fn pack(images: &[PathBuf], layout: &PageLayout) -> Vec<Page> {
    PagePacker::new(images, layout).collect()
}
