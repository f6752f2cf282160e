//! Turning paths into merge candidates.
//!
//! A [`CandidateReader`] stats each path and builds a [`FileCandidate`] with
//! a display name, size, MIME type guessed from the extension, and a content
//! handle. By default the handle points at the file on disk and the bytes
//! are only read when a merge runs; with [`CandidateReader::preloading`] the
//! bytes are read up front.
//!
//! # Examples
//!
//! ```no_run
//! use pdfbind::io::reader::CandidateReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = CandidateReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let results = reader.read_all(&paths).await;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::collection::{FileCandidate, FileContent};
use crate::error::{PdfBindError, Result};
use crate::utils::{display_name, mime_from_path};

/// Result of reading one path.
pub type ReadResult = Result<FileCandidate>;

/// Builds candidates from filesystem paths.
#[derive(Debug, Clone)]
pub struct CandidateReader {
    /// Read content into memory instead of keeping a path handle.
    preload: bool,

    /// Number of paths processed concurrently.
    workers: usize,
}

impl CandidateReader {
    /// Create a reader that keeps lazy disk handles.
    pub fn new() -> Self {
        Self {
            preload: false,
            workers: 4,
        }
    }

    /// Create a reader that reads every file's bytes immediately.
    pub fn preloading() -> Self {
        Self {
            preload: true,
            ..Self::new()
        }
    }

    /// Set the number of paths processed concurrently.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Build a candidate for a single path.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::FileNotFound`] if the path does not exist or
    /// is not a regular file, and an I/O error if preloading fails.
    pub async fn read(&self, path: &Path) -> ReadResult {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| PdfBindError::file_not_found(path.to_path_buf()))?;

        if !metadata.is_file() {
            return Err(PdfBindError::file_not_found(path.to_path_buf()));
        }

        let content = if self.preload {
            let bytes = tokio::fs::read(path).await?;
            FileContent::Memory(bytes.into())
        } else {
            FileContent::Disk(path.to_path_buf())
        };

        let candidate = FileCandidate {
            name: display_name(path),
            size: metadata.len(),
            mime: mime_from_path(path).to_string(),
            content,
        };
        debug!(
            file = %candidate.name,
            size = candidate.size,
            mime = %candidate.mime,
            "Read candidate"
        );

        Ok(candidate)
    }

    /// Build candidates for many paths.
    ///
    /// Paths are processed concurrently but results come back in the same
    /// order as `paths`, since that order becomes merge order.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Vec<ReadResult> {
        let tasks = paths.iter().map(|path| async move { self.read(path).await });

        stream::iter(tasks)
            .buffered(self.workers)
            .collect::<Vec<_>>()
            .await
    }
}

impl Default for CandidateReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PDF_MIME;
    use crate::testing::labelled_pdf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn test_read_pdf_candidate() {
        let dir = TempDir::new().unwrap();
        let bytes = labelled_pdf(&["A.p1"]);
        let path = write(&dir, "a.pdf", &bytes);

        let candidate = CandidateReader::new().read(&path).await.unwrap();

        assert_eq!(candidate.name, "a.pdf");
        assert_eq!(candidate.size, bytes.len() as u64);
        assert_eq!(candidate.mime, PDF_MIME);
        assert_eq!(candidate.content.path(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_preloading_reads_bytes() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.pdf", b"%PDF-1.5");

        let candidate = CandidateReader::preloading().read(&path).await.unwrap();

        assert!(candidate.content.path().is_none());
        assert_eq!(&*candidate.content.read().await.unwrap(), b"%PDF-1.5");
    }

    #[tokio::test]
    async fn test_read_guesses_mime_from_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.txt", b"hello");

        let candidate = CandidateReader::new().read(&path).await.unwrap();
        assert_eq!(candidate.mime, "text/plain");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = CandidateReader::new()
            .read(Path::new("/nonexistent/file.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, PdfBindError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_read_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let err = CandidateReader::new().read(dir.path()).await.unwrap_err();
        assert!(matches!(err, PdfBindError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_read_all_preserves_order() {
        let dir = TempDir::new().unwrap();
        let names = ["c.pdf", "a.pdf", "missing.pdf", "b.pdf"];
        let paths: Vec<PathBuf> = names
            .iter()
            .map(|name| {
                if *name == "missing.pdf" {
                    dir.path().join(name)
                } else {
                    write(&dir, name, b"%PDF-1.5")
                }
            })
            .collect();

        let results = CandidateReader::new().with_workers(3).read_all(&paths).await;

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().name, "c.pdf");
        assert_eq!(results[1].as_ref().unwrap().name, "a.pdf");
        assert!(results[2].is_err());
        assert_eq!(results[3].as_ref().unwrap().name, "b.pdf");
    }
}
