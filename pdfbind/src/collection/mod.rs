//! The pending-input model.
//!
//! A [`FileCollection`] holds validated [`PendingFile`]s in merge order and a
//! [`SelectionCursor`] naming the entry that move operations act on. All of
//! it is plain in-memory state with no I/O of its own; the content handles it
//! carries are only read when a merge runs.
//!
//! # Examples
//!
//! ```
//! use pdfbind::collection::{FileCandidate, FileCollection, SelectionCursor};
//!
//! let mut files = FileCollection::new();
//! let report = files.append(vec![
//!     FileCandidate::from_bytes("a.pdf", "application/pdf", b"%PDF-".to_vec()),
//!     FileCandidate::from_bytes("b.pdf", "application/pdf", b"%PDF-".to_vec()),
//!     FileCandidate::from_bytes("notes.txt", "text/plain", b"hi".to_vec()),
//! ]);
//! assert_eq!(report.accepted, 2);
//! assert_eq!(report.rejected.len(), 1);
//!
//! files.select(1).unwrap();
//! files.move_selected_up();
//! assert_eq!(files.get(0).unwrap().name(), "b.pdf");
//! assert_eq!(files.cursor(), SelectionCursor::SelectedAt(0));
//! ```

pub mod cursor;
pub mod list;
pub mod pending;

pub use cursor::SelectionCursor;
pub use list::{AppendReport, FileCollection};
pub use pending::{FileCandidate, FileContent, FileId, PendingFile};
