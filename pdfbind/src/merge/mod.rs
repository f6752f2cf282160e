//! PDF merging.
//!
//! [`Merger`] walks a snapshot of the pending list and copies every page of
//! every input, in order, into a fresh document built by
//! [`pages::OutputDocument`].

pub mod merger;
pub mod pages;

pub use merger::{MergeOutcome, MergeStatistics, Merger, suggested_filename};
pub use pages::OutputDocument;

use crate::collection::PendingFile;
use crate::config::Config;
use crate::error::Result;

/// Merge `files` with the settings in `config`.
///
/// Convenience wrapper around [`Merger::from_config`] and [`Merger::merge`].
pub async fn merge_files(files: &[PendingFile], config: &Config) -> Result<MergeOutcome> {
    Merger::from_config(config).merge(files).await
}
