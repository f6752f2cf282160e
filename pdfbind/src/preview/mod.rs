//! Previewing a merged document.
//!
//! Rendering is behind the [`PreviewRenderer`] trait. The built-in
//! [`LopdfPreview`] reports page count, first page size and PDF version. If
//! a renderer fails, [`build_preview`] degrades to [`Preview::Fallback`],
//! which points at the output so it can be opened in an external viewer.
//! A failed preview never blocks saving.

use std::fmt;
use std::path::{Path, PathBuf};

use lopdf::Document;
use tracing::warn;

use crate::error::{PdfBindError, Result};
use crate::validation::Inspection;

/// What a renderer reports about a document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPreview {
    /// Total number of pages.
    pub page_count: usize,

    /// First page dimensions (width, height) in points.
    pub page_dimensions: Option<(f32, f32)>,

    /// PDF version string, e.g. `1.5`.
    pub version: String,
}

/// A preview of merged output.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// The renderer succeeded.
    Rendered(RenderedPreview),

    /// The renderer failed; open the output elsewhere.
    Fallback {
        /// Where the output can be opened, if it has been written.
        location: Option<PathBuf>,

        /// Why rendering failed.
        reason: String,
    },
}

impl Preview {
    /// Whether rendering succeeded.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rendered(report) => f.write_str(&page_count_label(report.page_count)),
            Self::Fallback {
                location: Some(path),
                ..
            } => write!(f, "Preview unavailable. Open {} in a PDF viewer", path.display()),
            Self::Fallback { location: None, .. } => {
                f.write_str("Preview unavailable. Save the file and open it in a PDF viewer")
            }
        }
    }
}

/// Renders serialized PDF bytes into a preview report.
pub trait PreviewRenderer {
    /// Render `bytes`.
    fn render(&self, bytes: &[u8]) -> Result<RenderedPreview>;
}

/// Renderer backed by `lopdf` parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfPreview;

impl PreviewRenderer for LopdfPreview {
    fn render(&self, bytes: &[u8]) -> Result<RenderedPreview> {
        let doc = Document::load_mem(bytes)?;
        let inspection = Inspection::from_document("preview", bytes.len() as u64, &doc);

        if inspection.page_count == 0 {
            return Err(PdfBindError::other("Document has no pages"));
        }

        Ok(RenderedPreview {
            page_count: inspection.page_count,
            page_dimensions: inspection.page_dimensions,
            version: doc.version.clone(),
        })
    }
}

/// Render a preview, falling back to an open-elsewhere affordance.
pub fn build_preview<R>(renderer: &R, bytes: &[u8], location: Option<&Path>) -> Preview
where
    R: PreviewRenderer + ?Sized,
{
    match renderer.render(bytes) {
        Ok(report) => Preview::Rendered(report),
        Err(err) => {
            warn!(error = %err, "Preview rendering failed");
            Preview::Fallback {
                location: location.map(Path::to_path_buf),
                reason: err.to_string(),
            }
        }
    }
}

/// `"1 page total"` or `"N pages total"`.
pub fn page_count_label(page_count: usize) -> String {
    if page_count == 1 {
        "1 page total".to_string()
    } else {
        format!("{page_count} pages total")
    }
}
