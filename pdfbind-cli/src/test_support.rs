//! PDF fixtures for the binary's tests.

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, EncryptionState, EncryptionVersion, Object, Permissions, Stream, dictionary};

/// Write a PDF with `pages` blank pages into `dir`.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|n| {
            let content_id = doc.add_object(Stream::new(
                Dictionary::new(),
                format!("BT /F1 12 Tf 72 720 Td ({name} {n}) Tj ET").into_bytes(),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            Object::Reference(page_id)
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => pages as i64,
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("Failed to write fixture");
    path
}

/// Write a PDF with `pages` pages, encrypted with an owner password only.
pub fn write_encrypted_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let path = write_pdf(dir, name, pages);
    let mut doc = Document::load(&path).expect("Failed to reload fixture");
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::string_literal(vec![3u8; 16]),
            Object::string_literal(vec![5u8; 16]),
        ]),
    );

    let state = EncryptionState::try_from(EncryptionVersion::V2 {
        document: &doc,
        owner_password: "owner",
        user_password: "",
        key_length: 128,
        permissions: Permissions::all(),
    })
    .expect("Failed to build encryption state");
    doc.encrypt(&state).expect("Failed to encrypt fixture");
    doc.save(&path).expect("Failed to write fixture");
    path
}

/// Page count of a PDF on disk.
pub fn page_count(path: &Path) -> usize {
    Document::load(path)
        .expect("Output is not a loadable PDF")
        .get_pages()
        .len()
}
