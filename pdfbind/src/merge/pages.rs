//! Page tree construction for the merged document.
//!
//! The output starts as an empty catalog with an empty `Pages` node. Each
//! source document is renumbered past the output's highest object id, its
//! objects are imported, and its pages are appended as direct kids of the
//! output's page tree.

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::config::CompressionLevel;
use crate::error::{PdfBindError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed inputs.
const MAX_TREE_DEPTH: usize = 64;

/// A document under construction.
#[derive(Debug)]
pub struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    page_count: usize,
}

impl OutputDocument {
    /// Create an empty document: a catalog and a page tree with no kids.
    pub fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_count: 0,
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Append every page of `source`, in its own order, after the pages
    /// already present. Returns the number of pages appended.
    pub fn append(&mut self, mut source: Document) -> Result<usize> {
        for page_id in source.get_pages().into_values() {
            flatten_inherited(&mut source, page_id);
        }

        source.renumber_objects_with(self.document.max_id + 1);
        self.document.max_id = self.document.max_id.max(source.max_id);

        if source.version > self.document.version {
            self.document.version = source.version.clone();
        }

        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
        self.document.objects.extend(source.objects);
        self.add_pages_to_tree(&page_ids)?;

        Ok(page_ids.len())
    }

    /// Apply the compression level and serialize.
    pub fn finish(mut self, compression: CompressionLevel) -> Result<Vec<u8>> {
        match compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => {
                self.document.compress();
            }
            CompressionLevel::Maximum => {
                self.document.prune_objects();
                self.document.compress();
            }
        }

        self.document.renumber_objects();

        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|e| PdfBindError::other(format!("Failed to serialize merged PDF: {e}")))?;
        Ok(buffer)
    }

    fn add_pages_to_tree(&mut self, page_ids: &[ObjectId]) -> Result<()> {
        for &page_id in page_ids {
            let page = self
                .document
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|e| PdfBindError::other(format!("Imported page is missing: {e}")))?;
            page.set("Parent", Object::Reference(self.pages_id));
        }

        let pages = self
            .document
            .get_object_mut(self.pages_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| PdfBindError::other(format!("Failed to get pages object: {e}")))?;

        match pages.get_mut(b"Kids") {
            Ok(Object::Array(kids)) => {
                kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));
            }
            _ => return Err(PdfBindError::other("Pages dictionary missing Kids array")),
        }

        self.page_count += page_ids.len();
        pages.set("Count", Object::Integer(self.page_count as i64));

        Ok(())
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy inherited attributes onto the page itself, since it will be
/// re-parented directly under the output's root `Pages` node.
fn flatten_inherited(doc: &mut Document, page_id: ObjectId) {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return;
    };

    let mut missing: Vec<&[u8]> = INHERITABLE
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut inherited: Vec<(&[u8], Object)> = Vec::new();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((*key, value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    if inherited.is_empty() {
        return;
    }

    if let Ok(page) = doc.get_object_mut(page_id).and_then(Object::as_dict_mut) {
        for (key, value) in inherited {
            page.set(key.to_vec(), value);
        }
    }
}
