//! Integration tests for dry-run merge plans.

use pdfbind::collection::FileCollection;
use pdfbind::io::CandidateReader;
use pdfbind::output::merge_plan_lines;
use pdfbind::validation::Validator;
use tempfile::TempDir;

use crate::common::{abc_fixtures, temp_output_path, write_raw};

async fn collection(paths: &[std::path::PathBuf]) -> FileCollection {
    let candidates = CandidateReader::new()
        .read_all(paths)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let mut files = FileCollection::new();
    files.append(candidates);
    files
}

#[tokio::test]
async fn test_plan_reports_pages_per_file() {
    let dir = TempDir::new().unwrap();
    let files = collection(&abc_fixtures(&dir)).await;

    let summary = Validator::new().inspect_all(&files.snapshot()).await.unwrap();

    let pages: Vec<usize> = summary.results.iter().map(|r| r.page_count).collect();
    assert_eq!(pages, [1, 2, 1]);
    assert_eq!(summary.total_pages, 4);
    assert_eq!(
        summary.total_size,
        files.iter().map(|f| f.size()).sum::<u64>()
    );

    let lines = merge_plan_lines(&summary);
    assert_eq!(lines[0], "  1. a.pdf (1 page)");
    assert_eq!(lines[1], "  2. b.pdf (2 pages)");
    assert!(lines[3].starts_with("Total: 4 pages total"));
}

#[tokio::test]
async fn test_plan_does_not_write_output() {
    let dir = TempDir::new().unwrap();
    let files = collection(&abc_fixtures(&dir)).await;
    let output = temp_output_path();
    std::fs::remove_file(&output).unwrap();

    Validator::new().inspect_all(&files.snapshot()).await.unwrap();

    assert!(!output.exists(), "Output file should not be created in dry run");
}

#[tokio::test]
async fn test_plan_fails_on_unreadable_input() {
    let dir = TempDir::new().unwrap();
    let mut paths = abc_fixtures(&dir);
    paths.push(write_raw(&dir, "broken.pdf", b"not a pdf"));
    let files = collection(&paths).await;

    let err = Validator::new()
        .inspect_all(&files.snapshot())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("broken.pdf"));
}
