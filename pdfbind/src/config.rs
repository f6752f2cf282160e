//! Configuration module for pdfbind.
//!
//! A [`Config`] carries every tunable the session and the merge use:
//! - Which MIME type is accepted at ingestion
//! - The soft limit on the pending list
//! - The file name offered for merged output
//! - How encrypted inputs and compression are handled
//! - Output verbosity and overwrite behavior
//!
//! Values can come from a JSON file (see [`Config::from_json_file`]) and are
//! then overridden by command-line flags.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PdfBindError, Result};

/// MIME type of PDF documents.
pub const PDF_MIME: &str = "application/pdf";

/// Default soft limit on the number of pending files.
pub const DEFAULT_FILE_LIST_LIMIT: usize = 100;

/// Default name offered for a merged document.
pub const DEFAULT_MERGED_FILENAME: &str = "merged.pdf";

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// No compression - page streams are written as loaded.
    None,
    /// Compress streams.
    #[default]
    Standard,
    /// Compress streams and prune unreferenced objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfBindError;

    /// Parse compression level from "none", "standard", or "maximum".
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfBindError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Standard => "standard",
            Self::Maximum => "maximum",
        })
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a pdfbind session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// MIME type a candidate must declare to enter the pending list.
    pub accepted_mime: String,

    /// Soft limit on the pending list. Exceeding it warns but never rejects.
    pub file_list_limit: usize,

    /// File name offered when more than one input was merged.
    pub default_merged_filename: String,

    /// Load encrypted inputs without checking for a password.
    pub ignore_encryption: bool,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accepted_mime: PDF_MIME.to_string(),
            file_list_limit: DEFAULT_FILE_LIST_LIMIT,
            default_merged_filename: DEFAULT_MERGED_FILENAME.to_string(),
            ignore_encryption: true,
            compression: CompressionLevel::Standard,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::Prompt,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails [`Config::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_json_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - The accepted MIME type is empty
    /// - The list limit is zero
    /// - The default merged file name does not end in `.pdf`
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfBindError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.accepted_mime.trim().is_empty() {
            return Err(PdfBindError::invalid_config(
                "Accepted MIME type must not be empty",
            ));
        }

        if self.file_list_limit == 0 {
            return Err(PdfBindError::invalid_config(
                "File list limit must be at least 1",
            ));
        }

        if !self
            .default_merged_filename
            .to_lowercase()
            .ends_with(".pdf")
        {
            return Err(PdfBindError::invalid_config(format!(
                "Default merged file name must end in .pdf: {}",
                self.default_merged_filename
            )));
        }

        Ok(())
    }

    /// Check whether a declared MIME type passes ingestion.
    pub fn accepts(&self, mime: &str) -> bool {
        mime.eq_ignore_ascii_case(&self.accepted_mime)
    }

    /// Check if output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }
}
