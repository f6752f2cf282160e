//! Shared fixtures for unit tests.

use lopdf::{Dictionary, Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream, dictionary};

use crate::collection::FileCandidate;
use crate::config::PDF_MIME;

/// Build a PDF with one page per label. Each page carries its label in a
/// `PieceLabel` entry so tests can check page order after a merge.
pub(crate) fn labelled_pdf(labels: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for label in labels {
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            format!("BT /F1 12 Tf 50 700 Td ({label}) Tj ET").into_bytes(),
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "PieceLabel" => Object::string_literal(*label),
        });
        kids.push(Object::Reference(page_id));
    }

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
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Build a labelled PDF encrypted with the standard security handler.
///
/// With an empty `user_password` any reader can open it; otherwise the
/// password is needed to read its objects.
pub(crate) fn encrypted_pdf(labels: &[&str], user_password: &str) -> Vec<u8> {
    let mut doc = Document::load_mem(&labelled_pdf(labels)).unwrap();
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::string_literal(vec![7u8; 16]),
            Object::string_literal(vec![9u8; 16]),
        ]),
    );

    let state = EncryptionState::try_from(EncryptionVersion::V2 {
        document: &doc,
        owner_password: "owner",
        user_password,
        key_length: 128,
        permissions: Permissions::all(),
    })
    .unwrap();
    doc.encrypt(&state).unwrap();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Read page labels back in page order.
pub(crate) fn page_labels(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|page_id| {
            let page = doc.get_dictionary(*page_id).unwrap();
            let label = page.get(b"PieceLabel").unwrap().as_str().unwrap();
            String::from_utf8_lossy(label).into_owned()
        })
        .collect()
}

/// A PDF candidate with labelled pages.
pub(crate) fn pdf_candidate(name: &str, labels: &[&str]) -> FileCandidate {
    FileCandidate::from_bytes(name, PDF_MIME, labelled_pdf(labels))
}
