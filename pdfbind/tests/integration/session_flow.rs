//! Integration tests for the interactive session: reorder, merge, start over.

use pdfbind::collection::SelectionCursor;
use pdfbind::io::{CandidateReader, PdfWriter};
use pdfbind::preview::{LopdfPreview, Preview, build_preview};
use pdfbind::session::{Session, SessionEvent};
use tempfile::TempDir;

use crate::common::{abc_fixtures, page_labels, page_labels_at, pdf_candidate};

async fn abc_session(dir: &TempDir) -> Session {
    let candidates = CandidateReader::new()
        .read_all(&abc_fixtures(dir))
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let mut session = Session::new();
    session.apply(SessionEvent::AddFiles(candidates)).unwrap();
    session
}

#[tokio::test]
async fn test_move_last_file_to_front() {
    let dir = TempDir::new().unwrap();
    let mut session = abc_session(&dir).await;

    session.apply(SessionEvent::Select(2)).unwrap();
    session.apply(SessionEvent::MoveUp).unwrap();
    session.apply(SessionEvent::MoveUp).unwrap();
    assert_eq!(session.files().cursor(), SelectionCursor::SelectedAt(0));
    assert!(!session.view().can_move_up);

    let outcome = session.merge().await.unwrap();
    assert_eq!(page_labels(&outcome.bytes), ["C.p1", "A.p1", "B.p1", "B.p2"]);
}

#[tokio::test]
async fn test_boundary_moves_are_noops() {
    let dir = TempDir::new().unwrap();
    let mut session = abc_session(&dir).await;

    session.apply(SessionEvent::Select(0)).unwrap();
    session.apply(SessionEvent::MoveUp).unwrap();
    session.apply(SessionEvent::Select(2)).unwrap();
    session.apply(SessionEvent::MoveDown).unwrap();

    let names: Vec<String> = session.view().items.into_iter().map(|i| i.name).collect();
    assert_eq!(names, ["a.pdf", "b.pdf", "c.pdf"]);
}

#[tokio::test]
async fn test_remove_then_merge() {
    let dir = TempDir::new().unwrap();
    let mut session = abc_session(&dir).await;
    session.apply(SessionEvent::Select(2)).unwrap();

    session.apply(SessionEvent::Remove(0)).unwrap();

    assert_eq!(session.files().cursor(), SelectionCursor::SelectedAt(1));
    let outcome = session.merge().await.unwrap();
    assert_eq!(page_labels(&outcome.bytes), ["B.p1", "B.p2", "C.p1"]);
}

#[tokio::test]
async fn test_merge_preview_and_save() {
    let dir = TempDir::new().unwrap();
    let mut session = abc_session(&dir).await;
    let target = dir.path().join("out.pdf");

    let outcome = session.merge().await.unwrap().clone();

    let preview = build_preview(&LopdfPreview, &outcome.bytes, None);
    assert!(matches!(preview, Preview::Rendered(ref report) if report.page_count == 4));
    assert_eq!(preview.to_string(), "4 pages total");

    PdfWriter::new().save(&outcome.bytes, &target).await.unwrap();
    assert_eq!(page_labels_at(&target), ["A.p1", "B.p1", "B.p2", "C.p1"]);
}

#[tokio::test]
async fn test_merge_does_not_consume_list() {
    let dir = TempDir::new().unwrap();
    let mut session = abc_session(&dir).await;

    session.merge().await.unwrap();
    session
        .apply(SessionEvent::AddFiles(vec![pdf_candidate("d.pdf", &["D.p1"])]))
        .unwrap();
    let outcome = session.merge().await.unwrap();

    assert_eq!(
        page_labels(&outcome.bytes),
        ["A.p1", "B.p1", "B.p2", "C.p1", "D.p1"]
    );
}

#[tokio::test]
async fn test_start_over_resets_everything() {
    let dir = TempDir::new().unwrap();
    let mut session = abc_session(&dir).await;
    session.apply(SessionEvent::Select(1)).unwrap();
    session.merge().await.unwrap();

    session.apply(SessionEvent::StartOver).unwrap();

    let view = session.view();
    assert!(view.items.is_empty());
    assert_eq!(view.placeholder, Some("No files selected"));
    assert!(view.result.is_none());
    assert!(!view.merge_enabled);
    assert_eq!(session.files().cursor(), SelectionCursor::Unselected);
}
