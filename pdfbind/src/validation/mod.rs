//! Input validation for pdfbind.
//!
//! Two kinds of checks live here:
//! - The ingestion predicate: a candidate enters the pending list only if
//!   its declared MIME type is the accepted one.
//! - Document inspection: parse an input and report its page count,
//!   version and first page size, used for merge plans and previews.
//!
//! # Examples
//!
//! ```
//! use pdfbind::collection::FileCandidate;
//! use pdfbind::validation::Validator;
//!
//! let validator = Validator::new();
//! let notes = FileCandidate::from_bytes("notes.txt", "text/plain", b"hello".to_vec());
//! assert!(validator.check(&notes).is_err());
//! ```

use lopdf::{Document, Object};
use serde::{Deserialize, Serialize};
use tokio::task;

use crate::collection::{FileCandidate, PendingFile};
use crate::config::{Config, PDF_MIME};
use crate::error::{PdfBindError, Result};
use crate::utils::human_file_size;

/// Facts about one parsed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    /// Display name of the input.
    pub name: String,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the input in bytes.
    pub file_size: u64,

    /// Whether the trailer declares encryption.
    pub is_encrypted: bool,

    /// Number of objects in the PDF.
    pub object_count: usize,

    /// First page dimensions (width, height) in points, if available.
    pub page_dimensions: Option<(f32, f32)>,
}

impl Inspection {
    /// Collect facts from a loaded document.
    pub fn from_document(name: impl Into<String>, file_size: u64, doc: &Document) -> Self {
        let pages = doc.get_pages();

        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let page_dimensions = pages
            .values()
            .next()
            .and_then(|page_id| first_media_box(doc, *page_id));

        Self {
            name: name.into(),
            page_count: pages.len(),
            version,
            file_size,
            is_encrypted: is_encrypted(doc),
            object_count: doc.objects.len(),
            page_dimensions,
        }
    }
}

/// Inspections for an ordered set of inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionSummary {
    /// Individual inspections in list order.
    pub results: Vec<Inspection>,

    /// Total number of pages across all inputs.
    pub total_pages: usize,

    /// Total size in bytes.
    pub total_size: u64,
}

impl InspectionSummary {
    /// Create a summary from inspections.
    pub fn from_results(results: Vec<Inspection>) -> Self {
        let total_pages = results.iter().map(|r| r.page_count).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();

        Self {
            results,
            total_pages,
            total_size,
        }
    }

    /// Format the total size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        human_file_size(self.total_size)
    }
}

/// Validator for candidates and pending inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    accepted_mime: String,
    ignore_encryption: bool,
}

impl Validator {
    /// Validator accepting PDFs, encrypted ones included.
    pub fn new() -> Self {
        Self {
            accepted_mime: PDF_MIME.to_string(),
            ignore_encryption: true,
        }
    }

    /// Validator following the configured type and encryption policy.
    pub fn from_config(config: &Config) -> Self {
        Self {
            accepted_mime: config.accepted_mime.clone(),
            ignore_encryption: config.ignore_encryption,
        }
    }

    /// Check whether a declared MIME type is accepted.
    pub fn accepts(&self, mime: &str) -> bool {
        mime.eq_ignore_ascii_case(&self.accepted_mime)
    }

    /// Check a candidate against the ingestion predicate.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::Validation`] naming the file if its type is
    /// not accepted.
    pub fn check(&self, candidate: &FileCandidate) -> Result<()> {
        if self.accepts(&candidate.mime) {
            Ok(())
        } else {
            Err(PdfBindError::validation(&candidate.name, &candidate.mime))
        }
    }

    /// Parse raw bytes and inspect the document.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::SourceUnreadable`] if the bytes are not a
    /// loadable PDF, or if the document is encrypted and encryption is not
    /// ignored.
    pub fn inspect_bytes(&self, name: &str, bytes: &[u8]) -> Result<Inspection> {
        let doc = load_document(name, bytes, self.ignore_encryption)?;
        Ok(Inspection::from_document(name, bytes.len() as u64, &doc))
    }

    /// Read and inspect a pending input.
    pub async fn inspect(&self, file: &PendingFile) -> Result<Inspection> {
        let name = file.name().to_string();
        let bytes = file
            .content()
            .read()
            .await
            .map_err(|e| PdfBindError::source_unreadable(&name, e.to_string()))?;

        let validator = self.clone();
        task::spawn_blocking(move || validator.inspect_bytes(&name, &bytes))
            .await
            .map_err(|e| PdfBindError::other(format!("Inspection task failed: {e}")))?
    }

    /// Inspect every pending input, in order, stopping at the first failure.
    pub async fn inspect_all(&self, files: &[PendingFile]) -> Result<InspectionSummary> {
        let mut results = Vec::with_capacity(files.len());
        for file in files {
            results.push(self.inspect(file).await?);
        }
        Ok(InspectionSummary::from_results(results))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a document from bytes, naming the input in any failure.
///
/// An encrypted document that lopdf could not open with the empty user
/// password is always refused. `ignore_encryption` only decides whether
/// encrypted documents that did open are accepted.
pub(crate) fn load_document(name: &str, bytes: &[u8], ignore_encryption: bool) -> Result<Document> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| PdfBindError::source_unreadable(name, e.to_string()))?;

    if is_encrypted(&doc) {
        if doc.encryption_state.is_none() {
            return Err(PdfBindError::source_unreadable(
                name,
                "document is password protected",
            ));
        }
        if !ignore_encryption {
            return Err(PdfBindError::source_unreadable(
                name,
                "document is encrypted",
            ));
        }
    }

    Ok(doc)
}

fn is_encrypted(doc: &Document) -> bool {
    doc.trailer.get(b"Encrypt").is_ok()
}

fn first_media_box(doc: &Document, page_id: lopdf::ObjectId) -> Option<(f32, f32)> {
    let Ok(Object::Dictionary(page)) = doc.get_object(page_id) else {
        return None;
    };
    let Ok(Object::Array(media_box)) = page.get(b"MediaBox") else {
        return None;
    };
    if media_box.len() < 4 {
        return None;
    }
    let width = media_box[2].as_float().ok()?;
    let height = media_box[3].as_float().ok()?;
    Some((width, height))
}
