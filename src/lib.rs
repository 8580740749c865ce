//! cardsheet - Validate card images and lay them out on printable A4 sheets.
//!
//! This library checks a batch of card images against accepted pixel sizes
//! and resolutions, then packs the accepted cards into a fixed grid across
//! A4 pages and writes a single PDF. It provides:
//!
//! - Image validation with typed rejection reasons
//! - Non-recursive folder scanning with extension filtering
//! - Deterministic page packing in physical units
//! - PDF rendering with JPEG passthrough
//! - Atomic output writing
//!
//! # Examples
//!
//! ## Build a sheet
//!
//! ```no_run
//! use cardsheet::config::Config;
//! use cardsheet::output::OutputFormatter;
//! use cardsheet::sheet::build_sheet;
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input_dirs: vec![PathBuf::from("cards")],
//!     ..Default::default()
//! };
//!
//! let outcome = build_sheet(&config, &OutputFormatter::default())?;
//! println!("Created {} page document", outcome.page_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use cardsheet::config::{ImageSpecs, LayoutSettings};
//! use cardsheet::layout::{PageLayout, pack};
//! use cardsheet::validation::Validator;
//! use std::path::PathBuf;
//!
//! let specs = ImageSpecs::default();
//! let validator = Validator::new(&specs);
//! let candidates = vec![PathBuf::from("cards/a.png"), PathBuf::from("cards/b.png")];
//! let accepted: Vec<PathBuf> = candidates
//!     .into_iter()
//!     .filter(|path| validator.validate(path).is_accepted())
//!     .collect();
//!
//! let layout = PageLayout::from_settings(&LayoutSettings::default());
//! for page in pack(&accepted, &layout) {
//!     println!("page {} holds {} cards", page.number, page.len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod output;
pub mod render;
pub mod sheet;
pub mod units;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{CardSheetError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
