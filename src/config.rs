//! Configuration module for cardsheet.
//!
//! A [`Config`] is the single immutable value every component reads from.
//! It is assembled in three layers, lowest priority first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file ([`FileConfig`]), either given with `--config` or
//!    `cardsheet.toml` in the working directory
//! 3. Command-line flags (see `cli`)

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::layout::PageLayout;
use crate::utils::normalize_extension;

/// File name of the generated document inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "output.pdf";

/// Default file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cardsheet.toml";

/// Pixel sizes and resolutions an input image must have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpecs {
    /// Accepted (width, height) pairs in pixels. Matched exactly, never rotated.
    pub accepted_dimensions: Vec<(u32, u32)>,

    /// Accepted horizontal resolutions in DPI.
    pub accepted_resolutions: Vec<u32>,
}

impl ImageSpecs {
    /// Check a pixel size against the accepted pairs.
    pub fn accepts_dimensions(&self, width: u32, height: u32) -> bool {
        self.accepted_dimensions
            .iter()
            .any(|&(w, h)| w == width && h == height)
    }

    /// Check a resolution against the accepted set.
    pub fn accepts_resolution(&self, dpi: u32) -> bool {
        self.accepted_resolutions.contains(&dpi)
    }
}

impl Default for ImageSpecs {
    fn default() -> Self {
        Self {
            accepted_dimensions: vec![(745, 1040), (744, 1039)],
            accepted_resolutions: vec![300],
        }
    }
}

/// Page layout parameters in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Distance from the top and left page edges to the grid, in millimetres.
    pub margin_mm: f32,

    /// Gap between neighbouring cards, in millimetres.
    pub spacing_mm: f32,

    /// Number of cards per row.
    pub images_per_row: usize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            margin_mm: 10.0,
            spacing_mm: 2.0,
            images_per_row: 3,
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Replace an existing document (default).
    #[default]
    Force,
    /// Never overwrite, error if the document exists.
    NoClobber,
}

/// Complete configuration for one sheet-building run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directories to scan, in order. Relative paths resolve against `base_dir`.
    pub input_dirs: Vec<PathBuf>,

    /// Base directory for relative input and output paths.
    pub base_dir: PathBuf,

    /// Accepted file extensions, normalised (lowercase, no dot).
    pub extensions: Vec<String>,

    /// Sort each directory's entries by file name instead of filesystem order.
    pub sort_by_name: bool,

    /// Pixel and resolution requirements.
    pub specs: ImageSpecs,

    /// Page layout parameters.
    pub layout: LayoutSettings,

    /// Directory that receives `output.pdf`.
    pub output_dir: PathBuf,

    /// Optional document title.
    pub title: Option<String>,

    /// Validate and plan without writing.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print the validation summary as JSON.
    pub json: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dirs: Vec::new(),
            base_dir: PathBuf::from("."),
            extensions: ["png", "jpg", "jpeg"].map(String::from).to_vec(),
            sort_by_name: false,
            specs: ImageSpecs::default(),
            layout: LayoutSettings::default(),
            output_dir: PathBuf::from("output"),
            title: None,
            dry_run: false,
            verbose: false,
            quiet: false,
            json: false,
            overwrite_mode: OverwriteMode::default(),
        }
    }
}

impl Config {
    /// Resolve a path against the base directory unless it is absolute.
    ///
    /// The result is always absolute: a relative base directory is taken
    /// from the current working directory and `.` components are dropped.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        std::path::absolute(&joined).unwrap_or(joined)
    }

    /// Input directories resolved against the base directory.
    pub fn resolved_input_dirs(&self) -> Vec<PathBuf> {
        self.input_dirs
            .iter()
            .map(|dir| self.resolve_path(dir))
            .collect()
    }

    /// Full path of the document this run produces.
    pub fn output_path(&self) -> PathBuf {
        self.resolve_path(&self.output_dir).join(OUTPUT_FILE_NAME)
    }

    /// Page geometry derived from the layout settings.
    pub fn page_layout(&self) -> PageLayout {
        PageLayout::from_settings(&self.layout)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input directories are specified
    /// - No extensions or no accepted dimensions are configured
    /// - `images_per_row` is zero
    /// - Margin or spacing is negative
    /// - Verbose and quiet modes are both enabled
    ///
    /// A grid that runs off the page is not an error here; the caller warns.
    pub fn validate(&self) -> Result<()> {
        if self.input_dirs.is_empty() {
            bail!("No input directories specified");
        }

        if self.extensions.is_empty() {
            bail!("At least one supported extension is required");
        }

        if self.specs.accepted_dimensions.is_empty() {
            bail!("At least one accepted image size is required");
        }

        if self.layout.images_per_row == 0 {
            bail!("images_per_row must be at least 1");
        }

        if !self.layout.margin_mm.is_finite() || self.layout.margin_mm < 0.0 {
            bail!("Margin must be a non-negative number of millimetres");
        }

        if !self.layout.spacing_mm.is_finite() || self.layout.spacing_mm < 0.0 {
            bail!("Spacing must be a non-negative number of millimetres");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        Ok(())
    }

    /// Overlay the values present in a config file.
    pub fn apply_file(&mut self, file: &FileConfig) {
        let folders = &file.folders;
        if let Some(ref base) = folders.base_dir {
            self.base_dir = self.resolve_path(base);
        }
        if let Some(ref dirs) = folders.input_paths {
            self.input_dirs.clone_from(dirs);
        }
        if let Some(ref exts) = folders.supported_extensions {
            self.extensions = exts.iter().map(|e| normalize_extension(e)).collect();
        }
        if let Some(sort) = folders.sort_by_name {
            self.sort_by_name = sort;
        }

        let specs = &file.image_specs;
        if let Some(ref dims) = specs.valid_dimensions {
            self.specs.accepted_dimensions.clone_from(dims);
        }
        if let Some(ref dpis) = specs.valid_dpis {
            self.specs.accepted_resolutions.clone_from(dpis);
        }

        let pdf = &file.pdf_output;
        if let Some(margin) = pdf.margin {
            self.layout.margin_mm = margin;
        }
        if let Some(spacing) = pdf.spacing {
            self.layout.spacing_mm = spacing;
        }
        if let Some(per_row) = pdf.images_per_row {
            self.layout.images_per_row = per_row;
        }
        if let Some(ref dir) = pdf.output_dir {
            self.output_dir.clone_from(dir);
        }
        if pdf.title.is_some() {
            self.title.clone_from(&pdf.title);
        }
    }
}

/// On-disk TOML configuration. Every field is optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Input folder settings.
    pub folders: FoldersSection,
    /// Image requirements.
    pub image_specs: ImageSpecsSection,
    /// Document layout and destination.
    pub pdf_output: PdfOutputSection,
}

/// `[folders]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FoldersSection {
    /// Base directory for relative paths.
    pub base_dir: Option<PathBuf>,
    /// Directories to scan.
    pub input_paths: Option<Vec<PathBuf>>,
    /// Allowed extensions, with or without a leading dot.
    pub supported_extensions: Option<Vec<String>>,
    /// Sort directory entries by name.
    pub sort_by_name: Option<bool>,
}

/// `[image_specs]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageSpecsSection {
    /// Accepted `[width, height]` pairs.
    pub valid_dimensions: Option<Vec<(u32, u32)>>,
    /// Accepted DPI values.
    pub valid_dpis: Option<Vec<u32>>,
}

/// `[pdf_output]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfOutputSection {
    /// Margin in millimetres.
    pub margin: Option<f32>,
    /// Spacing in millimetres.
    pub spacing: Option<f32>,
    /// Cards per row.
    pub images_per_row: Option<usize>,
    /// Output directory.
    pub output_dir: Option<PathBuf>,
    /// Document title.
    pub title: Option<String>,
}

impl FileConfig {
    /// Parse a TOML document.
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Malformed configuration file")
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("In config file {}", path.display()))
    }

    /// Locate and load the configuration file.
    ///
    /// An explicit path must exist. Without one, `cardsheet.toml` in `dir`
    /// is used when present; otherwise there is no file layer.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Option<(PathBuf, Self)>> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            return Ok(Some((path.to_path_buf(), Self::from_path(path)?)));
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            let file = Self::from_path(&candidate)?;
            return Ok(Some((candidate, file)));
        }

        Ok(None)
    }
}
