//! The interactive merge session.
//!
//! A [`Session`] owns the pending list, the last merge result and the
//! configuration. Front ends feed it [`SessionEvent`]s and render the
//! [`SessionView`] it produces; they never touch the collection directly.
//!
//! While a merge is in flight the session is [`SessionState::Busy`] and
//! every mutating event is refused with [`PdfBindError::SessionBusy`].
//! The flag is cooperative: [`Session::begin_merge`] sets it and
//! [`Session::finish_merge`] clears it whether the merge succeeded or not.

use tracing::{debug, warn};

use crate::collection::{
    AppendReport, FileCandidate, FileCollection, PendingFile, SelectionCursor,
};
use crate::config::Config;
use crate::error::{PdfBindError, Result};
use crate::merge::{MergeOutcome, Merger};
use crate::preview::page_count_label;
use crate::utils::human_file_size;

/// Text of the privacy notice.
pub const PRIVACY_NOTICE: &str = "\
Privacy

pdfbind runs entirely on this machine. Your files are read from disk,
merged in memory and written only where you choose to save them.
Nothing is uploaded, no network connection is made, and no copy of
your documents is kept once the session ends.";

/// Shown above the list to explain that order matters.
pub const ORDER_HINT: &str = "Files order determines order in merged PDF";

/// Shown in place of an empty list.
pub const EMPTY_PLACEHOLDER: &str = "No files selected";

/// Whether a merge is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Events are accepted.
    #[default]
    Idle,
    /// A merge is running; mutations are refused.
    Busy,
}

/// A user action on the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Append candidates; invalid ones are rejected individually.
    AddFiles(Vec<FileCandidate>),
    /// Remove the entry at an index.
    Remove(usize),
    /// Click an entry: select it, or deselect it if already selected.
    Select(usize),
    /// Clear the selection.
    Deselect,
    /// Move the selected entry up.
    MoveUp,
    /// Move the selected entry down.
    MoveDown,
    /// Empty the list.
    Clear,
    /// Empty the list and drop the last result.
    StartOver,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::AddFiles(_) => "add",
            Self::Remove(_) => "remove",
            Self::Select(_) => "select",
            Self::Deselect => "deselect",
            Self::MoveUp => "move-up",
            Self::MoveDown => "move-down",
            Self::Clear => "clear",
            Self::StartOver => "start-over",
        }
    }
}

/// What applying an event did.
#[derive(Debug)]
pub enum EventOutcome {
    /// Files were offered for appending.
    Appended(AppendReport),
    /// An entry was removed.
    Removed(PendingFile),
    /// The selection changed.
    Selection(SelectionCursor),
    /// A move was attempted; `false` means it hit a boundary or nothing
    /// was selected.
    Moved(bool),
    /// The list (and for start-over, the result) was emptied.
    Cleared,
}

/// A merge detached from the session so it can run while the session
/// reports [`SessionState::Busy`].
#[derive(Debug)]
pub struct MergeJob {
    files: Vec<PendingFile>,
    merger: Merger,
}

impl MergeJob {
    /// Number of inputs in the snapshot.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Run the merge over the snapshot.
    pub async fn run(&self) -> Result<MergeOutcome> {
        self.merger.merge(&self.files).await
    }
}

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    /// 1-based position.
    pub number: usize,
    /// Display name.
    pub name: String,
    /// Human-readable size.
    pub size_label: String,
    /// Whether the cursor is on this row.
    pub selected: bool,
}

/// Summary of the last merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    /// Name offered for saving.
    pub filename: String,
    /// Human-readable output size.
    pub size_label: String,
    /// `"N pages total"`.
    pub page_label: String,
}

/// Everything a front end needs to draw the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Rows in merge order.
    pub items: Vec<FileItem>,
    /// `"N files selected"`.
    pub counter_label: String,
    /// Shown instead of rows when the list is empty.
    pub placeholder: Option<&'static str>,
    /// Reminder that order matters.
    pub order_hint: &'static str,
    /// Merge can be triggered.
    pub merge_enabled: bool,
    /// The selected entry can move up.
    pub can_move_up: bool,
    /// The selected entry can move down.
    pub can_move_down: bool,
    /// A merge is in flight.
    pub busy: bool,
    /// The last merge result, if any.
    pub result: Option<ResultView>,
}

/// The merge session.
#[derive(Debug)]
pub struct Session {
    files: FileCollection,
    state: SessionState,
    last_result: Option<MergeOutcome>,
    config: Config,
}

impl Session {
    /// Create a session with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a session with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            files: FileCollection::from_config(&config),
            state: SessionState::Idle,
            last_result: None,
            config,
        }
    }

    /// The session's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The pending list.
    pub fn files(&self) -> &FileCollection {
        &self.files
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a merge is in flight.
    pub fn is_busy(&self) -> bool {
        self.state == SessionState::Busy
    }

    /// Apply a user event.
    ///
    /// # Errors
    ///
    /// - [`PdfBindError::SessionBusy`] while a merge is in flight
    /// - [`PdfBindError::IndexOutOfRange`] for `Remove` or `Select` with a
    ///   bad index
    pub fn apply(&mut self, event: SessionEvent) -> Result<EventOutcome> {
        if self.is_busy() {
            warn!(event = event.name(), "Refusing event while merging");
            return Err(PdfBindError::SessionBusy);
        }
        debug!(event = event.name(), "Applying event");

        let outcome = match event {
            SessionEvent::AddFiles(candidates) => {
                EventOutcome::Appended(self.files.append(candidates))
            }
            SessionEvent::Remove(index) => EventOutcome::Removed(self.files.remove_at(index)?),
            SessionEvent::Select(index) => EventOutcome::Selection(self.files.select(index)?),
            SessionEvent::Deselect => {
                self.files.deselect();
                EventOutcome::Selection(SelectionCursor::Unselected)
            }
            SessionEvent::MoveUp => EventOutcome::Moved(self.files.move_selected_up()),
            SessionEvent::MoveDown => EventOutcome::Moved(self.files.move_selected_down()),
            SessionEvent::Clear => {
                self.files.clear();
                EventOutcome::Cleared
            }
            SessionEvent::StartOver => {
                self.files.clear();
                self.last_result = None;
                EventOutcome::Cleared
            }
        };

        Ok(outcome)
    }

    /// Snapshot the list and mark the session busy.
    ///
    /// The returned job must be handed back through
    /// [`Session::finish_merge`] to return the session to idle.
    ///
    /// # Errors
    ///
    /// - [`PdfBindError::SessionBusy`] if a merge is already running
    /// - [`PdfBindError::EmptyInput`] if there is nothing to merge; the
    ///   session stays idle
    pub fn begin_merge(&mut self) -> Result<MergeJob> {
        if self.is_busy() {
            return Err(PdfBindError::SessionBusy);
        }
        if self.files.is_empty() {
            return Err(PdfBindError::EmptyInput);
        }

        self.state = SessionState::Busy;
        Ok(MergeJob {
            files: self.files.snapshot(),
            merger: Merger::from_config(&self.config),
        })
    }

    /// Record a merge result and return to idle.
    ///
    /// A success replaces the last result. A failure leaves the previous
    /// result and the list untouched.
    pub fn finish_merge(&mut self, result: Result<MergeOutcome>) -> Result<&MergeOutcome> {
        self.state = SessionState::Idle;

        let outcome = result?;
        Ok(self.last_result.insert(outcome))
    }

    /// Merge the current list and keep the result.
    pub async fn merge(&mut self) -> Result<&MergeOutcome> {
        let job = self.begin_merge()?;
        let result = job.run().await;
        self.finish_merge(result)
    }

    /// The last successful merge.
    ///
    /// # Errors
    ///
    /// Returns [`PdfBindError::NoResult`] if nothing has been merged since
    /// the session started or was started over.
    pub fn result(&self) -> Result<&MergeOutcome> {
        self.last_result.as_ref().ok_or(PdfBindError::NoResult)
    }

    /// Build the render model.
    pub fn view(&self) -> SessionView {
        let cursor = self.files.cursor();
        let items = self
            .files
            .iter()
            .enumerate()
            .map(|(index, file)| FileItem {
                number: index + 1,
                name: file.name().to_string(),
                size_label: human_file_size(file.size()),
                selected: cursor.is_selected(index),
            })
            .collect();

        let result = self.last_result.as_ref().map(|outcome| ResultView {
            filename: outcome.suggested_filename.clone(),
            size_label: human_file_size(outcome.bytes.len() as u64),
            page_label: page_count_label(outcome.page_count),
        });

        SessionView {
            items,
            counter_label: counter_label(self.files.len()),
            placeholder: self.files.is_empty().then_some(EMPTY_PLACEHOLDER),
            order_hint: ORDER_HINT,
            merge_enabled: !self.files.is_empty() && !self.is_busy(),
            can_move_up: self.files.can_move_up(),
            can_move_down: self.files.can_move_down(),
            busy: self.is_busy(),
            result,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// `"1 file selected"` or `"N files selected"`.
pub fn counter_label(count: usize) -> String {
    let noun = if count == 1 { "file" } else { "files" };
    format!("{count} {noun} selected")
}
