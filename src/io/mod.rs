//! File input and output for cardsheet.
//!
//! - [`image`]: turning image files into PDF image XObjects
//! - [`writer`]: saving the finished document to disk

pub mod image;
pub mod writer;

pub use image::{ImageXObject, load_xobject};
pub use writer::{PdfWriter, WriteStatistics};
