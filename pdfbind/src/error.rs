//! Error types for pdfbind.
//!
//! Errors fall into four families:
//!
//! - **Ingestion**: a candidate file is not of the accepted type. These are
//!   recovered locally; the file is excluded and the user is warned.
//! - **Contract**: an index outside the collection was passed to a
//!   collection operation. Correct UI wiring never produces these.
//! - **Merge**: the collection is empty, or one of the inputs cannot be read
//!   or parsed. The merge aborts and nothing is produced.
//! - **Output**: the merged document cannot be written where the user asked.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfbind operations.
pub type Result<T> = std::result::Result<T, PdfBindError>;

/// Main error type for pdfbind operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfBindError {
    /// A candidate file was rejected because of its type.
    #[error("\"{name}\" is not a valid PDF file (type: {mime})")]
    Validation {
        /// Display name of the rejected file.
        name: String,
        /// MIME type that was declared for the file.
        mime: String,
    },

    /// A collection operation received an index outside `[0, len)`.
    #[error("Index {index} is out of range for a list of {len} file(s)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the collection at the time of the call.
        len: usize,
    },

    /// A merge was requested with no files in the collection.
    #[error("Please select at least one PDF file to merge")]
    EmptyInput,

    /// One of the inputs could not be read or parsed.
    #[error("Could not process {name}: {reason}")]
    SourceUnreadable {
        /// Display name of the offending file.
        name: String,
        /// What went wrong while loading it.
        reason: String,
    },

    /// A mutating event arrived while a merge was still running.
    #[error("A merge is in progress; wait for it to finish")]
    SessionBusy,

    /// An operation needed a merge result but none is available.
    #[error("Nothing has been merged yet")]
    NoResult,

    /// Input file was not found on disk.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

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

impl From<lopdf::Error> for PdfBindError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfBindError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfBindError {
    /// Create a Validation error.
    pub fn validation(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self::Validation {
            name: name.into(),
            mime: mime.into(),
        }
    }

    /// Create an IndexOutOfRange error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a SourceUnreadable error.
    pub fn source_unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
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

    /// Check if this error is recoverable (the session can carry on).
    ///
    /// Rejected files and failed merges leave the pending list intact, so the
    /// user can fix the input and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::EmptyInput
                | Self::SourceUnreadable { .. }
                | Self::SessionBusy
                | Self::NoResult
                | Self::FileNotFound { .. }
                | Self::OutputExists { .. }
        )
    }

    /// Check if this error should stop all processing immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::Cancelled
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => 2,
            Self::FileNotFound { .. } => 2,
            Self::SourceUnreadable { .. } => 3,
            Self::EmptyInput => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::IndexOutOfRange { .. } => 70, // EX_SOFTWARE
            Self::SessionBusy => 6,
            Self::NoResult => 6,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Other { .. } => 1,
        }
    }
}
