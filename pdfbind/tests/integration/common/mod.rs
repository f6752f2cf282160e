//! Shared helpers for pdfbind integration tests.
//!
//! Fixtures are generated on the fly: every page carries a `PieceLabel`
//! entry naming it, so tests can read page order back out of merged output.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use pdfbind::collection::FileCandidate;
use pdfbind::config::PDF_MIME;
use tempfile::TempDir;

/// Build a PDF with one page per label.
pub fn labelled_pdf(labels: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = labels
        .iter()
        .map(|label| {
            let content_id = doc.add_object(Stream::new(
                Dictionary::new(),
                format!("BT /F1 24 Tf 72 720 Td ({label}) Tj ET").into_bytes(),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "PieceLabel" => Object::string_literal(*label),
            });
            Object::Reference(page_id)
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => labels.len() as i64,
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("Failed to serialize fixture");
    buffer
}

/// Page labels of a serialized PDF, in page order.
pub fn page_labels(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("Output is not a loadable PDF");
    doc.get_pages()
        .values()
        .map(|page_id| {
            let page = doc.get_dictionary(*page_id).expect("Page is not a dictionary");
            let label = page
                .get(b"PieceLabel")
                .and_then(Object::as_str)
                .expect("Page has no label");
            String::from_utf8_lossy(label).into_owned()
        })
        .collect()
}

/// Page labels of a PDF on disk.
pub fn page_labels_at(path: &Path) -> Vec<String> {
    page_labels(&std::fs::read(path).expect("Failed to read output"))
}

/// An in-memory PDF candidate.
pub fn pdf_candidate(name: &str, labels: &[&str]) -> FileCandidate {
    FileCandidate::from_bytes(name, PDF_MIME, labelled_pdf(labels))
}

/// Write a labelled PDF fixture into `dir`.
pub fn write_fixture(dir: &TempDir, name: &str, labels: &[&str]) -> PathBuf {
    write_raw(dir, name, &labelled_pdf(labels))
}

/// Write arbitrary bytes into `dir`.
pub fn write_raw(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("Failed to write fixture");
    path
}

/// The standard three-input set: A has one page, B two, C one.
pub fn abc_fixtures(dir: &TempDir) -> Vec<PathBuf> {
    vec![
        write_fixture(dir, "a.pdf", &["A.p1"]),
        write_fixture(dir, "b.pdf", &["B.p1", "B.p2"]),
        write_fixture(dir, "c.pdf", &["C.p1"]),
    ]
}

/// Create a temporary output path for test results.
pub fn temp_output_path() -> tempfile::TempPath {
    tempfile::NamedTempFile::new()
        .expect("Failed to create temp file")
        .into_temp_path()
}
