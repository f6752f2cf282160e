//! Pending inputs and their content handles.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opaque handle to the bytes of an input.
///
/// Disk-backed content is read lazily when a merge runs, so a file that
/// disappears after being added surfaces as an unreadable source at merge
/// time rather than at ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Bytes already held in memory.
    Memory(Arc<[u8]>),
    /// A file on disk, read on demand.
    Disk(PathBuf),
}

impl FileContent {
    /// Read the full content.
    pub async fn read(&self) -> io::Result<Arc<[u8]>> {
        match self {
            Self::Memory(bytes) => Ok(Arc::clone(bytes)),
            Self::Disk(path) => tokio::fs::read(path).await.map(Arc::from),
        }
    }

    /// Path of disk-backed content.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Memory(_) => None,
            Self::Disk(path) => Some(path),
        }
    }
}

/// A file offered for the pending list, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Display name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared MIME type.
    pub mime: String,
    /// Content handle.
    pub content: FileContent,
}

impl FileCandidate {
    /// Build a candidate from bytes held in memory.
    pub fn from_bytes(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime: mime.into(),
            content: FileContent::Memory(bytes),
        }
    }
}

/// Identity of an entry in the pending list.
///
/// Two entries with the same name are still distinct files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub(crate) u64);

/// A validated input awaiting merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    id: FileId,
    name: String,
    size: u64,
    mime: String,
    content: FileContent,
}

impl PendingFile {
    pub(crate) fn accept(id: FileId, candidate: FileCandidate) -> Self {
        Self {
            id,
            name: candidate.name,
            size: candidate.size,
            mime: candidate.mime,
            content: candidate.content,
        }
    }

    /// Entry identity.
    pub fn id(&self) -> FileId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Declared MIME type.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Content handle.
    pub fn content(&self) -> &FileContent {
        &self.content
    }
}
