//! CLI argument parsing for cardsheet.
//!
//! This module defines the command-line interface using `clap` and turns
//! the parsed arguments into a [`Config`], layered over the optional TOML
//! file.
//!
//! # Examples
//!
//! ```no_run
//! use cardsheet::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = cli.load_config().expect("Invalid configuration");
//! println!("Scanning {} folder(s)", config.input_dirs.len());
//! ```

use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

use crate::config::{Config, FileConfig, OverwriteMode};
use crate::error::{CardSheetError, Result};
use crate::utils::normalize_extension;

/// Validate card images and lay them out on printable A4 sheets.
///
/// Every image in the input folders is checked against the accepted pixel
/// sizes and resolutions. Accepted cards are placed 63.5mm x 88.9mm,
/// three rows per page, into `<output-dir>/output.pdf`.
#[derive(Parser, Debug, Default)]
#[command(name = "cardsheet")]
#[command(version)]
#[command(about = "Validate card images and lay them out on printable A4 sheets", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Input folders to scan (in order, not recursive)
    ///
    /// Relative paths are resolved against --base-dir. When omitted, the
    /// folders listed in the config file are used.
    ///
    /// Examples:
    ///   cardsheet cards/
    ///   cardsheet front/ back/ -o print
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Configuration file (TOML)
    ///
    /// Defaults to ./cardsheet.toml when that file exists.
    #[arg(short, long, value_name = "FILE", env = "CARDSHEET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory that receives output.pdf
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base directory for relative input and output paths
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Accepted file extension (repeatable, replaces the default list)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Accepted pixel size as WIDTHxHEIGHT (repeatable)
    ///
    /// Example: --size 745x1040 --size 744x1039
    #[arg(long = "size", value_name = "WxH", value_parser = parse_size)]
    pub sizes: Vec<(u32, u32)>,

    /// Accepted resolution in DPI (repeatable)
    #[arg(long = "dpi", value_name = "DPI")]
    pub dpis: Vec<u32>,

    /// Page margin in millimetres
    #[arg(long, value_name = "MM")]
    pub margin: Option<f32>,

    /// Gap between cards in millimetres
    #[arg(long, value_name = "MM")]
    pub spacing: Option<f32>,

    /// Cards per row
    #[arg(long, value_name = "N")]
    pub per_row: Option<usize>,

    /// Set title metadata for the output PDF
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Sort each folder's files by name instead of filesystem order
    #[arg(long)]
    pub sort: bool,

    /// Dry run - validate and plan pages without writing the PDF
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output (repeat for more log detail: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never overwrite an existing output file
    #[arg(long)]
    pub no_clobber: bool,

    /// Print the validation summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Validate CLI arguments before processing.
    ///
    /// Performs early checks that don't require file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.per_row == Some(0) {
            return Err(CardSheetError::invalid_config(
                "Cards per row must be at least 1",
            ));
        }

        for (name, value) in [("Margin", self.margin), ("Spacing", self.spacing)] {
            if let Some(mm) = value
                && (!mm.is_finite() || mm < 0.0)
            {
                return Err(CardSheetError::invalid_config(format!(
                    "{name} must be a non-negative number of millimetres, got {mm}"
                )));
            }
        }

        if self.extensions.iter().any(|e| normalize_extension(e).is_empty()) {
            return Err(CardSheetError::invalid_config("Empty file extension"));
        }

        Ok(())
    }

    /// Locate the config file and build the final configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is missing or malformed, or the
    /// resulting configuration is invalid.
    pub fn load_config(&self) -> Result<Config> {
        let file = FileConfig::discover(self.config.as_deref(), Path::new("."))?;
        self.to_config(file.as_ref().map(|(_, file)| file))
    }

    /// Convert CLI arguments into a validated Config.
    ///
    /// Values given on the command line override the config file, which
    /// overrides the built-in defaults. Repeatable flags replace the whole
    /// list rather than extending it.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn to_config(&self, file: Option<&FileConfig>) -> Result<Config> {
        let mut config = Config::default();
        if let Some(file) = file {
            config.apply_file(file);
        }

        if let Some(ref base) = self.base_dir {
            config.base_dir = std::path::absolute(base).unwrap_or_else(|_| base.clone());
        }
        if !self.dirs.is_empty() {
            config.input_dirs.clone_from(&self.dirs);
        }
        if !self.extensions.is_empty() {
            config.extensions = self
                .extensions
                .iter()
                .map(|e| normalize_extension(e))
                .collect();
        }
        if !self.sizes.is_empty() {
            config.specs.accepted_dimensions.clone_from(&self.sizes);
        }
        if !self.dpis.is_empty() {
            config.specs.accepted_resolutions.clone_from(&self.dpis);
        }
        if let Some(margin) = self.margin {
            config.layout.margin_mm = margin;
        }
        if let Some(spacing) = self.spacing {
            config.layout.spacing_mm = spacing;
        }
        if let Some(per_row) = self.per_row {
            config.layout.images_per_row = per_row;
        }
        if let Some(ref dir) = self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if self.title.is_some() {
            config.title.clone_from(&self.title);
        }

        config.sort_by_name |= self.sort;
        config.dry_run = self.dry_run;
        config.verbose = self.verbose > 0;
        config.quiet = self.quiet;
        config.json = self.json;
        if self.no_clobber {
            config.overwrite_mode = OverwriteMode::NoClobber;
        }

        config.validate().map_err(|e| {
            CardSheetError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}

/// Parse a `WIDTHxHEIGHT` pixel size.
fn parse_size(value: &str) -> std::result::Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;

    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid size '{value}': {e}"))
    };
    let size = (parse(width)?, parse(height)?);

    if size.0 == 0 || size.1 == 0 {
        return Err(format!("size must be non-zero, got '{value}'"));
    }
    Ok(size)
}
