//! Rectangles in PDF user space and the aspect-fit policy.

use serde::Serialize;

/// An axis-aligned rectangle in points. `(x, y)` is the lower-left corner,
/// matching PDF user space where y grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its lower-left corner and size.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Scale a `src_width` x `src_height` image to fit inside `bounds`,
/// keeping its aspect ratio and centring it.
///
/// The result never exceeds `bounds`; the unused strip on one axis is left
/// empty (letterboxing). Degenerate sizes fall back to the full box.
pub fn fit_within(bounds: Rect, src_width: u32, src_height: u32) -> Rect {
    if src_width == 0 || src_height == 0 {
        return bounds;
    }

    let scale = (bounds.width / src_width as f32).min(bounds.height / src_height as f32);
    let width = src_width as f32 * scale;
    let height = src_height as f32 * scale;

    Rect::new(
        bounds.x + (bounds.width - width) / 2.0,
        bounds.y + (bounds.height - height) / 2.0,
        width,
        height,
    )
}
