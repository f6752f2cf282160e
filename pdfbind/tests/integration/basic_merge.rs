//! Integration tests for merging files read from disk.

use pdfbind::collection::FileCollection;
use pdfbind::config::{CompressionLevel, Config};
use pdfbind::io::{CandidateReader, PdfWriter};
use pdfbind::merge::{Merger, merge_files};
use tempfile::TempDir;

use crate::common::{abc_fixtures, page_labels, page_labels_at, temp_output_path, write_fixture};

async fn collection_from_disk(paths: &[std::path::PathBuf]) -> FileCollection {
    let candidates = CandidateReader::new()
        .read_all(paths)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("All fixtures should be readable");

    let mut files = FileCollection::new();
    let report = files.append(candidates);
    assert_eq!(report.accepted, paths.len());
    files
}

#[tokio::test]
async fn test_merge_three_files_in_order() {
    let dir = TempDir::new().unwrap();
    let files = collection_from_disk(&abc_fixtures(&dir)).await;

    let outcome = Merger::new().merge(&files.snapshot()).await.unwrap();

    assert_eq!(outcome.page_count, 4);
    assert_eq!(outcome.statistics.files_merged, 3);
    assert_eq!(page_labels(&outcome.bytes), ["A.p1", "B.p1", "B.p2", "C.p1"]);
}

#[tokio::test]
async fn test_merge_single_page_documents() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<_> = (1..=5)
        .map(|n| write_fixture(&dir, &format!("doc{n}.pdf"), &[&format!("D{n}")]))
        .collect();
    let files = collection_from_disk(&paths).await;

    let outcome = Merger::new().merge(&files.snapshot()).await.unwrap();

    assert_eq!(outcome.page_count, 5);
    assert_eq!(page_labels(&outcome.bytes), ["D1", "D2", "D3", "D4", "D5"]);
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "twice.pdf", &["T.p1", "T.p2"]);
    let files = collection_from_disk(&[path.clone(), path]).await;

    let outcome = Merger::new().merge(&files.snapshot()).await.unwrap();

    assert_eq!(page_labels(&outcome.bytes), ["T.p1", "T.p2", "T.p1", "T.p2"]);
    assert_eq!(outcome.suggested_filename, "merged.pdf");
}

#[tokio::test]
async fn test_merge_and_save() {
    let dir = TempDir::new().unwrap();
    let files = collection_from_disk(&abc_fixtures(&dir)).await;
    let output = temp_output_path();

    let outcome = merge_files(&files.snapshot(), &Config::default())
        .await
        .unwrap();
    let stats = PdfWriter::new()
        .save_with_stats(outcome.bytes.clone(), &output)
        .await
        .unwrap();

    assert_eq!(stats.file_size, outcome.bytes.len() as u64);
    assert_eq!(page_labels_at(&output), ["A.p1", "B.p1", "B.p2", "C.p1"]);
}

#[tokio::test]
async fn test_merge_without_compression() {
    let dir = TempDir::new().unwrap();
    let files = collection_from_disk(&abc_fixtures(&dir)).await;
    let config = Config {
        compression: CompressionLevel::None,
        ..Config::default()
    };

    let outcome = merge_files(&files.snapshot(), &config).await.unwrap();

    assert_eq!(outcome.statistics.compression, CompressionLevel::None);
    assert_eq!(outcome.page_count, 4);
}

#[tokio::test]
async fn test_single_input_keeps_its_name() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "quarterly-report.pdf", &["Q.p1"]);
    let files = collection_from_disk(&[path]).await;

    let outcome = Merger::new().merge(&files.snapshot()).await.unwrap();

    assert_eq!(outcome.suggested_filename, "quarterly-report.pdf");
}
