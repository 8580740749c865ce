//! Image files as PDF image XObjects.
//!
//! Baseline and progressive JPEGs with one or three components are embedded
//! unchanged with the `DCTDecode` filter. Every other image is decoded to
//! 8-bit RGB; an alpha channel, when present, becomes a separate grayscale
//! soft mask.

use image::{DynamicImage, ImageFormat};
use lopdf::{Dictionary, Object, Stream, dictionary};
use std::path::Path;

use crate::error::{CardSheetError, Result};

/// Start-of-frame markers that carry the component count.
const SOF_MARKERS: &[u8] = &[0xC0, 0xC1, 0xC2];

/// An image ready to be added to a document.
#[derive(Debug, Clone)]
pub struct ImageXObject {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// The image stream.
    pub stream: Stream,
    /// Soft mask for images with transparency.
    pub smask: Option<Stream>,
}

impl ImageXObject {
    /// Check if the source bytes were embedded without re-encoding.
    pub fn is_passthrough(&self) -> bool {
        matches!(
            self.stream.dict.get(b"Filter"),
            Ok(Object::Name(name)) if name == b"DCTDecode"
        )
    }
}

/// Load an image file as an XObject.
///
/// # Errors
///
/// Returns [`CardSheetError::RenderFailed`] if the file cannot be read or
/// decoded.
pub fn load_xobject(path: &Path) -> Result<ImageXObject> {
    let bytes = std::fs::read(path)
        .map_err(|e| CardSheetError::render_failed(path.to_path_buf(), e.to_string()))?;
    from_bytes(&bytes)
        .map_err(|e| CardSheetError::render_failed(path.to_path_buf(), e.to_string()))
}

fn from_bytes(bytes: &[u8]) -> image::ImageResult<ImageXObject> {
    if image::guess_format(bytes)? == ImageFormat::Jpeg {
        if let Some(frame) = jpeg_frame(bytes) {
            return Ok(jpeg_passthrough(bytes, frame));
        }
    }

    let decoded = image::load_from_memory(bytes)?;
    Ok(decode_to_rgb(&decoded))
}

/// Dimensions and component count from a JPEG frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JpegFrame {
    width: u32,
    height: u32,
    components: u8,
}

/// Find the first supported start-of-frame segment.
///
/// Returns `None` for anything a plain `DCTDecode` stream cannot express
/// directly, such as CMYK or 12-bit data.
fn jpeg_frame(bytes: &[u8]) -> Option<JpegFrame> {
    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        // Fill bytes
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        let len = usize::from(u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]));

        if SOF_MARKERS.contains(&marker) {
            let segment = bytes.get(pos + 4..pos + 2 + len)?;
            if segment.len() < 6 || segment[0] != 8 {
                return None;
            }
            let height = u32::from(u16::from_be_bytes([segment[1], segment[2]]));
            let width = u32::from(u16::from_be_bytes([segment[3], segment[4]]));
            let components = segment[5];
            return match components {
                1 | 3 if width > 0 && height > 0 => Some(JpegFrame {
                    width,
                    height,
                    components,
                }),
                _ => None,
            };
        }

        // Any other frame type or start of scan ends the search
        if matches!(marker, 0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF | 0xDA) {
            return None;
        }
        pos += 2 + len;
    }
    None
}

fn jpeg_passthrough(bytes: &[u8], frame: JpegFrame) -> ImageXObject {
    let color_space = if frame.components == 1 {
        "DeviceGray"
    } else {
        "DeviceRGB"
    };
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(frame.width),
        "Height" => i64::from(frame.height),
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
        "Filter" => "DCTDecode",
    };

    ImageXObject {
        width: frame.width,
        height: frame.height,
        stream: Stream::new(dict, bytes.to_vec()).with_compression(false),
        smask: None,
    }
}

fn decode_to_rgb(decoded: &DynamicImage) -> ImageXObject {
    let (width, height) = (decoded.width(), decoded.height());

    let (rgb, smask) = if decoded.color().has_alpha() {
        let rgba = decoded.to_rgba8();
        let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
        let mut alpha = Vec::with_capacity(rgba.len() / 4);
        for pixel in rgba.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel.0[3]);
        }
        let mask = Stream::new(raw_image_dict(width, height, "DeviceGray"), alpha);
        (rgb, Some(mask))
    } else {
        (decoded.to_rgb8().into_raw(), None)
    };

    ImageXObject {
        width,
        height,
        stream: Stream::new(raw_image_dict(width, height, "DeviceRGB"), rgb),
        smask,
    }
}

fn raw_image_dict(width: u32, height: u32, color_space: &str) -> Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
    }
}
