//! Integration tests for error handling and edge cases.

use pdfbind::PdfBindError;
use pdfbind::collection::{FileCandidate, FileCollection};
use pdfbind::config::PDF_MIME;
use pdfbind::io::{CandidateReader, PdfWriter};
use pdfbind::merge::Merger;
use pdfbind::session::{EventOutcome, Session, SessionEvent, SessionState};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::common::{abc_fixtures, pdf_candidate, write_raw};

#[tokio::test]
async fn test_error_nonexistent_input() {
    let err = CandidateReader::new()
        .read(Path::new("/nonexistent/file.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, PdfBindError::FileNotFound { .. }));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_error_empty_input_list() {
    let mut session = Session::new();

    let err = session.merge().await.unwrap_err();

    assert!(matches!(err, PdfBindError::EmptyInput));
    assert!(session.files().is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_non_pdf_is_rejected_by_name() {
    let dir = TempDir::new().unwrap();
    let mut paths = abc_fixtures(&dir);
    paths.insert(1, write_raw(&dir, "notes.txt", b"just some text"));

    let candidates: Vec<FileCandidate> = CandidateReader::new()
        .read_all(&paths)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();

    let mut files = FileCollection::new();
    let report = files.append(candidates);

    assert_eq!(report.accepted, 3);
    assert_eq!(report.rejected.len(), 1);
    assert!(report.rejected[0].to_string().contains("notes.txt"));
    assert_eq!(files.len(), 3);
    assert!(files.iter().all(|f| f.mime() == PDF_MIME));
}

#[tokio::test]
async fn test_rejected_only_batch_leaves_list_unchanged() {
    let mut session = Session::new();
    session
        .apply(SessionEvent::AddFiles(vec![pdf_candidate("a.pdf", &["A.p1"])]))
        .unwrap();

    let outcome = session
        .apply(SessionEvent::AddFiles(vec![FileCandidate::from_bytes(
            "image.png",
            "image/png",
            vec![0x89, b'P', b'N', b'G'],
        )]))
        .unwrap();

    let EventOutcome::Appended(report) = outcome else {
        panic!("expected append report");
    };
    assert!(matches!(
        &report.rejected[0],
        PdfBindError::Validation { name, .. } if name == "image.png"
    ));
    assert_eq!(session.files().len(), 1);
}

#[tokio::test]
async fn test_corrupt_second_file_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let mut paths = abc_fixtures(&dir);
    paths[1] = write_raw(&dir, "b.pdf", b"this is not really a pdf");

    let candidates = CandidateReader::new()
        .read_all(&paths)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let mut session = Session::new();
    session.apply(SessionEvent::AddFiles(candidates)).unwrap();
    session.apply(SessionEvent::Select(2)).unwrap();
    let before = session.files().snapshot();

    let err = session.merge().await.unwrap_err();

    assert!(matches!(err, PdfBindError::SourceUnreadable { ref name, .. } if name == "b.pdf"));
    assert!(err.to_string().starts_with("Could not process b.pdf"));
    assert_eq!(session.files().snapshot(), before);
    assert_eq!(session.state(), SessionState::Idle);
    assert!(matches!(session.result(), Err(PdfBindError::NoResult)));
}

#[tokio::test]
async fn test_file_deleted_after_adding() {
    let dir = TempDir::new().unwrap();
    let paths = abc_fixtures(&dir);
    let candidates = CandidateReader::new()
        .read_all(&paths)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let mut files = FileCollection::new();
    files.append(candidates);

    std::fs::remove_file(&paths[2]).unwrap();

    let err = Merger::new().merge(&files.snapshot()).await.unwrap_err();
    assert!(matches!(err, PdfBindError::SourceUnreadable { ref name, .. } if name == "c.pdf"));
    assert_eq!(files.len(), 3);
}

#[tokio::test]
async fn test_index_out_of_range_is_reported() {
    let mut session = Session::new();
    session
        .apply(SessionEvent::AddFiles(vec![pdf_candidate("a.pdf", &["A.p1"])]))
        .unwrap();

    let err = session.apply(SessionEvent::Remove(5)).unwrap_err();
    assert!(matches!(err, PdfBindError::IndexOutOfRange { index: 5, len: 1 }));
    assert_eq!(session.files().len(), 1);
}

#[tokio::test]
async fn test_write_into_missing_directory() {
    let writer = PdfWriter::new();
    let target = PathBuf::from("/nonexistent/dir/merged.pdf");

    assert!(writer.can_write(&target).await.is_err());
    assert!(writer.save(b"%PDF-1.5", &target).await.is_err());
}
