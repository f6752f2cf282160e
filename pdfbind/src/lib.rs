//! pdfbind - Combine several PDF files into one, in an order you choose.
//!
//! The library is organised around an interactive session:
//!
//! - [`collection`]: the ordered list of pending inputs and the selection
//!   cursor that move operations act on
//! - [`validation`]: the ingestion predicate and document inspection
//! - [`merge`]: the sequential merge over a snapshot of the list
//! - [`preview`]: a page-count preview with a graceful fallback
//! - [`session`]: the state machine tying the above together
//! - [`io`], [`output`]: the file-system and terminal boundaries
//!
//! # Examples
//!
//! ## Session
//!
//! ```no_run
//! use pdfbind::io::CandidateReader;
//! use pdfbind::session::{Session, SessionEvent};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let candidates = CandidateReader::new()
//!     .read_all(&paths)
//!     .await
//!     .into_iter()
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let mut session = Session::new();
//! session.apply(SessionEvent::AddFiles(candidates))?;
//! session.apply(SessionEvent::Select(1))?;
//! session.apply(SessionEvent::MoveUp)?;
//!
//! let outcome = session.merge().await?;
//! println!("{} pages, save as {}", outcome.page_count, outcome.suggested_filename);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use pdfbind::collection::{FileCandidate, FileCollection};
//! use pdfbind::config::Config;
//! use pdfbind::io::PdfWriter;
//! use pdfbind::merge;
//! use std::path::Path;
//!
//! # async fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut files = FileCollection::new();
//! files.append(vec![
//!     FileCandidate::from_bytes("a.pdf", "application/pdf", a),
//!     FileCandidate::from_bytes("b.pdf", "application/pdf", b),
//! ]);
//!
//! let outcome = merge::merge_files(&files.snapshot(), &Config::default()).await?;
//! PdfWriter::new()
//!     .save(&outcome.bytes, Path::new(&outcome.suggested_filename))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod preview;
pub mod session;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfBindError, Result};
pub use session::{Session, SessionEvent};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
