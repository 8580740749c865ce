//! Error types for cardsheet.
//!
//! Per-file and per-directory problems (a missing input folder, an image
//! that cannot be opened) never reach the caller: the batch records them
//! and keeps going. Everything that prevents a document from being
//! produced ends the run with a dedicated exit code.

use std::io;
use std::path::PathBuf;

/// Result type alias for cardsheet operations.
pub type Result<T> = std::result::Result<T, CardSheetError>;

/// Main error type for cardsheet operations.
#[derive(Debug, thiserror::Error)]
pub enum CardSheetError {
    /// A configured input directory does not exist or cannot be read.
    #[error("Input directory not found: {}", .path.display())]
    InputDirNotFound {
        /// Resolved path of the directory.
        path: PathBuf,
    },

    /// An image could not be opened or decoded.
    #[error("Failed to read image: {}\n  Reason: {reason}", .path.display())]
    ImageUnreadable {
        /// Path to the image.
        path: PathBuf,
        /// Decoder or I/O failure detail.
        reason: String,
    },

    /// Validation left nothing to lay out.
    #[error("No valid images found, no document was created")]
    NoAcceptedImages,

    /// Output file already exists and overwriting is disabled.
    #[error(
        "Output file already exists: {}\n  Remove it or run without --no-clobber",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// The output file or its directory could not be created.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the document failed part way.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A placed image could not be drawn onto its page.
    #[error("Failed to draw image: {}\n  Reason: {reason}", .path.display())]
    RenderFailed {
        /// Path to the image being drawn.
        path: PathBuf,
        /// Details about the failure.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for CardSheetError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for CardSheetError {
    fn from(err: anyhow::Error) -> Self {
        Self::invalid_config(format!("{err:#}"))
    }
}

impl CardSheetError {
    /// Create an InputDirNotFound error.
    pub fn input_dir_not_found(path: PathBuf) -> Self {
        Self::InputDirNotFound { path }
    }

    /// Create an ImageUnreadable error.
    pub fn image_unreadable(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::ImageUnreadable {
            path,
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a RenderFailed error.
    pub fn render_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::RenderFailed {
            path,
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoAcceptedImages => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Other { .. } => 1,
            Self::InputDirNotFound { .. } => 2,
            Self::ImageUnreadable { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::RenderFailed { .. } => 6,
        }
    }
}
