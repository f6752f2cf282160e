//! Core PDF merging implementation.
//!
//! One sequential pass over a snapshot of the pending list: read each input,
//! parse it, and append its pages to the output document. The first input
//! that cannot be read or parsed aborts the whole merge.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task;
use tracing::{debug, info};

use crate::collection::PendingFile;
use crate::config::{CompressionLevel, Config};
use crate::error::{PdfBindError, Result};
use crate::merge::pages::OutputDocument;
use crate::utils::human_file_size;
use crate::validation::load_document;

/// Statistics about a merge operation.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStatistics {
    /// Number of inputs merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total time taken for the merge.
    pub merge_time: Duration,

    /// Total size of the inputs.
    pub input_size: u64,

    /// Size of the serialized output.
    pub output_size: u64,

    /// Compression level applied to the output.
    pub compression: CompressionLevel,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        human_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        human_file_size(self.output_size)
    }
}

/// The product of a successful merge.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The serialized merged PDF.
    pub bytes: Arc<[u8]>,

    /// Number of pages in the merged PDF.
    pub page_count: usize,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// File name to offer when saving.
    pub suggested_filename: String,
}

/// File name to offer for a merge of `files`.
///
/// A single input keeps its own name; several inputs get the configured
/// default name.
pub fn suggested_filename(files: &[PendingFile], config: &Config) -> String {
    match files {
        [only] => only.name().to_string(),
        _ => config.default_merged_filename.clone(),
    }
}

/// PDF merger that combines pending inputs in order.
#[derive(Debug, Clone)]
pub struct Merger {
    config: Config,
}

impl Merger {
    /// Create a merger with default settings.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create a merger following `config`'s encryption, compression and
    /// naming settings.
    pub fn from_config(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Merge `files` in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `files` is empty ([`PdfBindError::EmptyInput`])
    /// - An input cannot be read or parsed ([`PdfBindError::SourceUnreadable`],
    ///   naming that input)
    /// - Serializing the output fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfbind::collection::FileCollection;
    /// # use pdfbind::merge::Merger;
    /// # async fn example(files: FileCollection) -> Result<(), Box<dyn std::error::Error>> {
    /// let outcome = Merger::new().merge(&files.snapshot()).await?;
    /// println!("{} pages", outcome.page_count);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, files: &[PendingFile]) -> Result<MergeOutcome> {
        if files.is_empty() {
            return Err(PdfBindError::EmptyInput);
        }

        let merge_start = Instant::now();
        let total = files.len();
        let mut output = OutputDocument::new();
        let mut input_size = 0u64;

        for (position, file) in files.iter().enumerate() {
            debug!(file = file.name(), "Processing file {}/{}", position + 1, total);

            let bytes = file
                .content()
                .read()
                .await
                .map_err(|e| PdfBindError::source_unreadable(file.name(), e.to_string()))?;
            input_size += bytes.len() as u64;

            let name = file.name().to_string();
            let ignore_encryption = self.config.ignore_encryption;
            let document =
                task::spawn_blocking(move || load_document(&name, &bytes, ignore_encryption))
                    .await
                    .map_err(|e| PdfBindError::other(format!("Load task failed: {e}")))??;

            if document.get_pages().is_empty() {
                return Err(PdfBindError::source_unreadable(
                    file.name(),
                    "document has no pages",
                ));
            }

            let appended = output.append(document)?;
            debug!(file = file.name(), pages = appended, "Appended pages");
        }

        let total_pages = output.page_count();
        let compression = self.config.compression;
        let bytes = task::spawn_blocking(move || output.finish(compression))
            .await
            .map_err(|e| PdfBindError::other(format!("Serialize task failed: {e}")))??;

        let statistics = MergeStatistics {
            files_merged: total,
            total_pages,
            merge_time: merge_start.elapsed(),
            input_size,
            output_size: bytes.len() as u64,
            compression,
        };

        info!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            size = %statistics.format_output_size(),
            "Merge complete"
        );

        Ok(MergeOutcome {
            bytes: bytes.into(),
            page_count: total_pages,
            statistics,
            suggested_filename: suggested_filename(files, &self.config),
        })
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}
