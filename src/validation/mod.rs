//! Image validation for cardsheet.
//!
//! Each candidate file is classified as accepted or rejected against the
//! configured [`ImageSpecs`]:
//! - The file must decode as an image
//! - Its pixel size must equal one of the accepted (width, height) pairs
//! - If it carries a horizontal resolution, that value must be accepted
//!
//! Resolution is advisory. A file with no resolution metadata passes that
//! check. Dimension mismatch is reported before resolution mismatch.
//!
//! # Examples
//!
//! ```no_run
//! use cardsheet::config::ImageSpecs;
//! use cardsheet::validation::Validator;
//! use std::path::Path;
//!
//! let specs = ImageSpecs::default();
//! let validator = Validator::new(&specs);
//! let result = validator.validate(Path::new("cards/ace.png"));
//! if let Some(reason) = result.reason() {
//!     println!("rejected: {reason}");
//! }
//! ```

pub mod candidate;
pub mod resolution;

pub use candidate::ImageCandidate;

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::config::ImageSpecs;
use crate::error::CardSheetError;

/// Why an image was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RejectReason {
    /// Pixel size matched none of the accepted pairs.
    InvalidDimensions {
        /// Actual width in pixels.
        width: u32,
        /// Actual height in pixels.
        height: u32,
    },

    /// Embedded resolution is present but not accepted.
    InvalidResolution {
        /// Resolution read from the file, in DPI.
        dpi: u32,
    },

    /// The file could not be opened or decoded.
    Unreadable {
        /// Decoder or I/O error message.
        detail: String,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions {width}x{height}")
            }
            Self::InvalidResolution { dpi } => write!(f, "Invalid DPI {dpi}"),
            Self::Unreadable { detail } => write!(f, "Error processing image: {detail}"),
        }
    }
}

/// Outcome of validating one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum ValidationResult {
    /// The image meets every requirement.
    Accepted,
    /// The image is excluded from the layout.
    Rejected(RejectReason),
}

impl ValidationResult {
    /// Check if the image was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Rejection reason, if any.
    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// Classifies image files against a set of requirements.
///
/// The validator has no side effects; callers log the outcome.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    specs: &'a ImageSpecs,
}

impl<'a> Validator<'a> {
    /// Create a validator for the given requirements.
    pub fn new(specs: &'a ImageSpecs) -> Self {
        Self { specs }
    }

    /// Open and classify a file.
    ///
    /// Never fails: an unreadable file is a rejection, not an error.
    pub fn validate(&self, path: &Path) -> ValidationResult {
        match ImageCandidate::open(path) {
            Ok(candidate) => self.classify(&candidate),
            Err(CardSheetError::ImageUnreadable { reason, .. }) => {
                ValidationResult::Rejected(RejectReason::Unreadable { detail: reason })
            }
            Err(err) => ValidationResult::Rejected(RejectReason::Unreadable {
                detail: err.to_string(),
            }),
        }
    }

    /// Classify an already opened candidate.
    pub fn classify(&self, candidate: &ImageCandidate) -> ValidationResult {
        let (width, height) = candidate.dimensions();
        if !self.specs.accepts_dimensions(width, height) {
            return ValidationResult::Rejected(RejectReason::InvalidDimensions { width, height });
        }

        match candidate.resolution() {
            Some(dpi) if !self.specs.accepts_resolution(dpi) => {
                ValidationResult::Rejected(RejectReason::InvalidResolution { dpi })
            }
            _ => ValidationResult::Accepted,
        }
    }
}
