//! Shared helpers for the integration tests.
//!
//! Fixtures are generated on the fly into a temporary directory, so the
//! tests need no binary files in the repository.

#![allow(dead_code)]

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::{Rgb, RgbImage};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Pixel size accepted by the default configuration.
pub const CARD_SIZE: (u32, u32) = (745, 1040);

/// Small pixel size used where the tests supply their own specs.
pub const SMALL_CARD: (u32, u32) = (25, 35);

/// A scratch workspace with a `cards/` folder.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("cards")).expect("Failed to create cards dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn cards(&self) -> PathBuf {
        self.root().join("cards")
    }

    pub fn output_pdf(&self) -> PathBuf {
        self.root().join("output").join("output.pdf")
    }

    /// Write a PNG, with a `pHYs` chunk when `dpi` is given.
    pub fn png(&self, name: &str, size: (u32, u32), dpi: Option<u32>) -> PathBuf {
        let path = self.cards().join(name);
        write_png(&path, size, dpi);
        path
    }

    /// Write a JPEG, with JFIF density when `dpi` is given.
    pub fn jpeg(&self, name: &str, size: (u32, u32), dpi: Option<u16>) -> PathBuf {
        let path = self.cards().join(name);
        write_jpeg(&path, size, dpi);
        path
    }

    /// Write `count` accepted PNG cards named `card00.png`, `card01.png`, ...
    pub fn cards_n(&self, count: usize, size: (u32, u32)) -> Vec<PathBuf> {
        (0..count)
            .map(|i| self.png(&format!("card{i:02}.png"), size, None))
            .collect()
    }

    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.cards().join(name);
        fs::write(&path, contents).expect("Failed to write file");
        path
    }
}

pub fn write_png(path: &Path, size: (u32, u32), dpi: Option<u32>) {
    let file = File::create(path).expect("Failed to create png");
    let mut encoder = png::Encoder::new(BufWriter::new(file), size.0, size.1);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(dpi.map(|dpi| {
        let ppm = (f64::from(dpi) / 0.0254).round() as u32;
        png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }
    }));
    let pixels = vec![128u8; (size.0 * size.1 * 3) as usize];
    let mut writer = encoder.write_header().expect("Failed to write png header");
    writer
        .write_image_data(&pixels)
        .expect("Failed to write png data");
}

pub fn write_jpeg(path: &Path, size: (u32, u32), dpi: Option<u16>) {
    let mut file = File::create(path).expect("Failed to create jpeg");
    let mut encoder = JpegEncoder::new(&mut file);
    if let Some(dpi) = dpi {
        encoder.set_pixel_density(PixelDensity::dpi(dpi));
    }
    encoder
        .encode_image(&RgbImage::from_pixel(size.0, size.1, Rgb([10, 120, 200])))
        .expect("Failed to encode jpeg");
}

pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
