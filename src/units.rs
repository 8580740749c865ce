//! Physical units and fixed print dimensions.
//!
//! Page coordinates are PDF points (1/72 inch). Everything the user
//! configures is in millimetres and converted here.

/// Points per inch in PDF user space.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Millimetres per inch.
pub const MM_PER_INCH: f32 = 25.4;

/// A4 page width in millimetres.
pub const A4_WIDTH_MM: f32 = 210.0;

/// A4 page height in millimetres.
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Card width in millimetres (63.5mm, poker size).
pub const CARD_WIDTH_MM: f32 = 63.5;

/// Card height in millimetres (88.9mm, poker size).
pub const CARD_HEIGHT_MM: f32 = 88.9;

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Convert PDF points to millimetres.
pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_INCH / POINTS_PER_INCH
}

/// Convert a dots-per-centimetre density to whole DPI.
pub fn dpcm_to_dpi(dpcm: f64) -> u32 {
    (dpcm * 2.54).round() as u32
}

/// Convert a pixels-per-metre density to whole DPI.
pub fn ppm_to_dpi(ppm: f64) -> u32 {
    (ppm * 0.0254).round() as u32
}
