//! Selection cursor over the pending list.
//!
//! The cursor points at no entry or at exactly one valid index. Every list
//! mutation updates it in the same call, so it never dangles.

/// At most one "active" index into the pending list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionCursor {
    /// Nothing is selected.
    #[default]
    Unselected,
    /// The entry at this index is selected.
    SelectedAt(usize),
}

impl SelectionCursor {
    /// Selected index, if any.
    pub fn index(&self) -> Option<usize> {
        match *self {
            Self::Unselected => None,
            Self::SelectedAt(index) => Some(index),
        }
    }

    /// Whether `index` is the selected entry.
    pub fn is_selected(&self, index: usize) -> bool {
        self.index() == Some(index)
    }

    /// Apply a click on `index`. Clicking the selected entry deselects it.
    pub(crate) fn click(&mut self, index: usize) {
        *self = if self.is_selected(index) {
            Self::Unselected
        } else {
            Self::SelectedAt(index)
        };
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::Unselected;
    }

    /// Follow the removal of the entry at `removed`.
    pub(crate) fn after_remove(&mut self, removed: usize) {
        if let Self::SelectedAt(selected) = *self {
            if removed == selected {
                *self = Self::Unselected;
            } else if removed < selected {
                *self = Self::SelectedAt(selected - 1);
            }
        }
    }

    /// Follow a swap of the entries at `a` and `b`.
    pub(crate) fn after_swap(&mut self, a: usize, b: usize) {
        if let Self::SelectedAt(selected) = *self {
            if selected == a {
                *self = Self::SelectedAt(b);
            } else if selected == b {
                *self = Self::SelectedAt(a);
            }
        }
    }

    /// Whether the selected entry can move towards the front of a list of `len`.
    pub fn can_move_up(&self, len: usize) -> bool {
        len > 1 && matches!(*self, Self::SelectedAt(index) if index > 0 && index < len)
    }

    /// Whether the selected entry can move towards the back of a list of `len`.
    pub fn can_move_down(&self, len: usize) -> bool {
        len > 1 && matches!(*self, Self::SelectedAt(index) if index + 1 < len)
    }
}
