//! Cursor-based browsing over a sequence of entries.
//!
//! A [`Navigator`] session walks a view (the full store or a search
//! result) one entry at a time. The set of actions valid at each
//! position is pure data recomputed from `(length, cursor)` on every
//! query — nothing is retained or mutated across calls. Edit and delete
//! delegate to the store, which shrinks or re-sorts the underlying
//! sequence and keeps the view consistent in the same call. The
//! navigator composes with the search engine: it is handed a result
//! view by value rather than knowing how to search.

use worklog_record::record::{EntryId, TaskDraft};

use crate::store::{StoreError, TaskStore};

/// One browsing action, keyed for menu dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    /// Move the cursor to the previous entry.
    Previous,
    /// Move the cursor to the next entry.
    Next,
    /// Edit the entry under the cursor.
    Edit,
    /// Delete the entry under the cursor.
    Delete,
    /// End the browsing session.
    Return,
}

impl BrowseAction {
    /// All actions, in display order.
    pub const ALL: [Self; 5] = [
        Self::Previous,
        Self::Next,
        Self::Edit,
        Self::Delete,
        Self::Return,
    ];

    /// The key that selects this action.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Previous => 'p',
            Self::Next => 'n',
            Self::Edit => 'e',
            Self::Delete => 'd',
            Self::Return => 'r',
        }
    }

    /// The label shown in the action line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Previous => "[P]revious",
            Self::Next => "[N]ext",
            Self::Edit => "[E]dit",
            Self::Delete => "[D]elete",
            Self::Return => "[R]eturn",
        }
    }

    /// Maps a key back to its action.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.key() == key.to_ascii_lowercase())
    }
}

/// Returns the actions valid for a view of `length` entries at `cursor`.
///
/// - empty view: only [`BrowseAction::Return`];
/// - single entry: edit, delete, return (no paging);
/// - first of several: no previous;
/// - last of several: no next;
/// - anywhere in between: all five.
///
/// # Panics
///
/// Panics when `cursor >= length` for a non-empty view: an out-of-bounds
/// cursor is a caller bug, not a user-facing condition.
#[must_use]
pub fn action_set(length: usize, cursor: usize) -> Vec<BrowseAction> {
    use BrowseAction::{Delete, Edit, Next, Previous, Return};

    if length == 0 {
        return vec![Return];
    }
    assert!(
        cursor < length,
        "cursor {cursor} out of bounds for view of {length}"
    );
    if length == 1 {
        return vec![Edit, Delete, Return];
    }
    if cursor == 0 {
        return vec![Next, Edit, Delete, Return];
    }
    if cursor == length - 1 {
        return vec![Previous, Edit, Delete, Return];
    }
    vec![Previous, Next, Edit, Delete, Return]
}

/// Cursor state machine over a view of entries.
#[derive(Debug)]
pub struct Navigator {
    view: Vec<EntryId>,
    cursor: usize,
}

impl Navigator {
    /// Starts a session over `view` with the cursor on the first entry.
    #[must_use]
    pub fn new(view: Vec<EntryId>) -> Self {
        Self { view, cursor: 0 }
    }

    /// Returns the actions valid at the current position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is out of bounds for the view.
    #[must_use]
    pub fn actions(&self) -> Vec<BrowseAction> {
        action_set(self.view.len(), self.cursor)
    }

    /// Returns the entry under the cursor, or `None` for an empty view.
    #[must_use]
    pub fn current(&self) -> Option<EntryId> {
        self.view.get(self.cursor).copied()
    }

    /// Returns the cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the view length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Returns true when the view has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Moves the cursor to the previous entry.
    ///
    /// Only dispatch this when [`Self::actions`] offers it.
    ///
    /// # Panics
    ///
    /// Panics when the cursor is already on the first entry.
    pub fn previous(&mut self) {
        assert!(self.cursor > 0, "no previous entry");
        self.cursor -= 1;
    }

    /// Moves the cursor to the next entry.
    ///
    /// Only dispatch this when [`Self::actions`] offers it.
    ///
    /// # Panics
    ///
    /// Panics when the cursor is already on the last entry.
    pub fn next(&mut self) {
        assert!(self.cursor + 1 < self.view.len(), "no next entry");
        self.cursor += 1;
    }

    /// Replaces the content of the entry under the cursor.
    ///
    /// The cursor stays on the same view slot; the action set is
    /// recomputed on the next query.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store's edit/persist.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is out of bounds for the view.
    pub fn edit(&mut self, store: &mut TaskStore, draft: TaskDraft) -> Result<(), StoreError> {
        self.cursor = store.edit(self.cursor, &self.view, draft)?;
        Ok(())
    }

    /// Deletes the entry under the cursor when `confirmed`, adopting the
    /// store's adjusted cursor.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store's delete/persist.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is out of bounds for the view.
    pub fn delete(&mut self, store: &mut TaskStore, confirmed: bool) -> Result<(), StoreError> {
        self.cursor = store.delete(self.cursor, &mut self.view, confirmed)?;
        Ok(())
    }
}
