//! Reading the horizontal resolution embedded in an image file.
//!
//! Resolution metadata is optional. Every reader here returns `None` when
//! the file carries no usable value or the metadata cannot be parsed; that
//! is a normal outcome, not an error.
//!
//! Sources, in order of preference:
//! - PNG: the `pHYs` chunk (pixels per metre)
//! - JPEG: the JFIF `APP0` density fields
//! - anything else, or as a fallback: EXIF `XResolution` / `ResolutionUnit`

use image::ImageFormat;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::trace;

use crate::units::{dpcm_to_dpi, ppm_to_dpi};

/// Length of SOI + APP0 up to and including the density fields.
const JFIF_HEADER_LEN: usize = 18;

/// Read the horizontal resolution of an image in whole DPI.
pub fn read_resolution(path: &Path, format: Option<ImageFormat>) -> Option<u32> {
    let dpi = match format {
        Some(ImageFormat::Png) => read_png_resolution(path).or_else(|| read_exif_resolution(path)),
        Some(ImageFormat::Jpeg) => {
            read_jfif_resolution(path).or_else(|| read_exif_resolution(path))
        }
        _ => read_exif_resolution(path),
    };
    trace!(path = %path.display(), ?dpi, "resolution metadata");
    dpi
}

fn read_png_resolution(path: &Path) -> Option<u32> {
    let file = File::open(path).ok()?;
    let reader = png::Decoder::new(BufReader::new(file)).read_info().ok()?;
    let dims = reader.info().pixel_dims?;

    match dims.unit {
        png::Unit::Meter if dims.xppu > 0 => Some(ppm_to_dpi(f64::from(dims.xppu))),
        _ => None,
    }
}

fn read_jfif_resolution(path: &Path) -> Option<u32> {
    let mut header = [0u8; JFIF_HEADER_LEN];
    File::open(path).ok()?.read_exact(&mut header).ok()?;
    parse_jfif_density(&header)
}

/// Extract the X density from the start of a JFIF file.
///
/// Layout: `FFD8 FFE0 <len:2> "JFIF\0" <version:2> <units:1> <xdensity:2> <ydensity:2>`.
/// Units 1 are dots per inch, 2 dots per centimetre; 0 only gives an
/// aspect ratio and yields `None`.
pub(crate) fn parse_jfif_density(header: &[u8]) -> Option<u32> {
    if header.len() < JFIF_HEADER_LEN
        || header[..4] != [0xFF, 0xD8, 0xFF, 0xE0]
        || &header[6..11] != b"JFIF\0"
    {
        return None;
    }

    let units = header[13];
    let x_density = u16::from_be_bytes([header[14], header[15]]);
    if x_density == 0 {
        return None;
    }

    match units {
        1 => Some(u32::from(x_density)),
        2 => Some(dpcm_to_dpi(f64::from(x_density))),
        _ => None,
    }
}

fn read_exif_resolution(path: &Path) -> Option<u32> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;

    let field = exif.get_field(exif::Tag::XResolution, exif::In::PRIMARY)?;
    let value = match field.value {
        exif::Value::Rational(ref values) => values.first()?.to_f64(),
        _ => return None,
    };
    if !value.is_finite() || value <= 0.0 {
        return None;
    }

    // ResolutionUnit: 2 = inch (default), 3 = centimetre
    let unit = exif
        .get_field(exif::Tag::ResolutionUnit, exif::In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(2);

    match unit {
        3 => Some(dpcm_to_dpi(value)),
        _ => Some(value.round() as u32),
    }
}
