//! The ordered list of pending inputs.

use tracing::{debug, warn};

use crate::collection::cursor::SelectionCursor;
use crate::collection::pending::{FileCandidate, FileId, PendingFile};
use crate::config::{Config, DEFAULT_FILE_LIST_LIMIT};
use crate::error::{PdfBindError, Result};
use crate::validation::Validator;

/// Outcome of appending a batch of candidates.
#[derive(Debug, Default)]
pub struct AppendReport {
    /// Number of candidates that entered the list.
    pub accepted: usize,

    /// One validation error per rejected candidate, in arrival order.
    pub rejected: Vec<PdfBindError>,

    /// Whether the list is now longer than the configured soft limit.
    pub over_limit: bool,
}

impl AppendReport {
    /// Whether any candidate was rejected.
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Ordered pending inputs plus the selection cursor.
///
/// List order is merge order. The cursor is owned here so that every
/// mutation keeps it valid.
#[derive(Debug, Clone)]
pub struct FileCollection {
    files: Vec<PendingFile>,
    cursor: SelectionCursor,
    validator: Validator,
    soft_limit: usize,
    next_id: u64,
}

impl FileCollection {
    /// Empty list accepting PDFs with the default soft limit.
    pub fn new() -> Self {
        Self::with_validator(Validator::new(), DEFAULT_FILE_LIST_LIMIT)
    }

    /// Empty list following the configured ingestion policy.
    pub fn from_config(config: &Config) -> Self {
        Self::with_validator(Validator::from_config(config), config.file_list_limit)
    }

    fn with_validator(validator: Validator, soft_limit: usize) -> Self {
        Self {
            files: Vec::new(),
            cursor: SelectionCursor::Unselected,
            validator,
            soft_limit,
            next_id: 0,
        }
    }

    /// Validate and append candidates in arrival order.
    ///
    /// Each rejected candidate is reported on its own; the rest of the batch
    /// is still appended. Duplicates are allowed.
    pub fn append<I>(&mut self, candidates: I) -> AppendReport
    where
        I: IntoIterator<Item = FileCandidate>,
    {
        let mut report = AppendReport::default();

        for candidate in candidates {
            if let Err(err) = self.validator.check(&candidate) {
                warn!(file = %candidate.name, mime = %candidate.mime, "rejected candidate");
                report.rejected.push(err);
                continue;
            }

            let id = FileId(self.next_id);
            self.next_id += 1;
            debug!(file = %candidate.name, size = candidate.size, "appended");
            self.files.push(PendingFile::accept(id, candidate));
            report.accepted += 1;
        }

        report.over_limit = self.files.len() > self.soft_limit;
        if report.over_limit {
            warn!(
                len = self.files.len(),
                limit = self.soft_limit,
                "pending list exceeds soft limit"
            );
        }

        report
    }

    /// Remove and return the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::IndexOutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<PendingFile> {
        self.check_index(index)?;
        let removed = self.files.remove(index);
        self.cursor.after_remove(index);
        Ok(removed)
    }

    /// Swap the entry at `index` with its predecessor.
    ///
    /// Returns `false` without changing anything when `index` is 0.
    pub fn move_up(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.swap(index, index - 1);
        Ok(true)
    }

    /// Swap the entry at `index` with its successor.
    ///
    /// Returns `false` without changing anything when `index` is the last.
    pub fn move_down(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if index + 1 == self.files.len() {
            return Ok(false);
        }
        self.swap(index, index + 1);
        Ok(true)
    }

    /// Move the selected entry up. No-op when nothing is selected.
    pub fn move_selected_up(&mut self) -> bool {
        match self.cursor.index() {
            Some(index) => self.move_up(index).unwrap_or(false),
            None => false,
        }
    }

    /// Move the selected entry down. No-op when nothing is selected.
    pub fn move_selected_down(&mut self) -> bool {
        match self.cursor.index() {
            Some(index) => self.move_down(index).unwrap_or(false),
            None => false,
        }
    }

    /// Click on the entry at `index`, toggling its selection.
    pub fn select(&mut self, index: usize) -> Result<SelectionCursor> {
        self.check_index(index)?;
        self.cursor.click(index);
        Ok(self.cursor)
    }

    /// Drop the selection.
    pub fn deselect(&mut self) {
        self.cursor.clear();
    }

    /// Remove every entry and the selection.
    pub fn clear(&mut self) {
        self.files.clear();
        self.cursor.clear();
    }

    /// Owned copy of the current order.
    pub fn snapshot(&self) -> Vec<PendingFile> {
        self.files.clone()
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&PendingFile> {
        self.files.get(index)
    }

    /// Entries in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingFile> {
        self.files.iter()
    }

    /// Current cursor.
    pub fn cursor(&self) -> SelectionCursor {
        self.cursor
    }

    /// Currently selected entry.
    pub fn selected(&self) -> Option<&PendingFile> {
        self.cursor.index().and_then(|index| self.files.get(index))
    }

    /// Whether the selected entry can move up.
    pub fn can_move_up(&self) -> bool {
        self.cursor.can_move_up(self.files.len())
    }

    /// Whether the selected entry can move down.
    pub fn can_move_down(&self) -> bool {
        self.cursor.can_move_down(self.files.len())
    }

    /// Soft limit in force.
    pub fn soft_limit(&self) -> usize {
        self.soft_limit
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.files.swap(a, b);
        self.cursor.after_swap(a, b);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.files.len() {
            Ok(())
        } else {
            Err(PdfBindError::index_out_of_range(index, self.files.len()))
        }
    }
}

impl Default for FileCollection {
    fn default() -> Self {
        Self::new()
    }
}
