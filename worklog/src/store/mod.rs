//! The task store: exclusive owner of the persisted, date-sorted log.
//!
//! All mutation of the log goes through [`TaskStore`] operations; every
//! mutating operation rewrites the whole file before returning, so the
//! file on disk always matches the last completed mutation. Browsed
//! sequences (the full store or a search result) are views of entry ids,
//! resolved through the store — a delete shrinks the store and the view
//! in the same call, and an edit that moves an entry in the sort order
//! never invalidates the view.

use std::io;
use std::path::{Path, PathBuf};

use worklog_record::codec::{self, CodecError};
use worklog_record::record::{EntryId, Task, TaskDraft};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read the log file.
    #[error("failed to read log file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write the log file.
    #[error("failed to write log file {path}: {source}")]
    Write {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The log file contents failed to decode.
    #[error("failed to decode log file: {0}")]
    Decode(#[from] CodecError),
}

/// Owner of the in-memory work log and its backing file.
///
/// Invariant: between operations the sequence is sorted ascending by
/// date, entries with equal dates keeping their relative insertion
/// order.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Opens the log at `path`, loading and sorting its entries.
    ///
    /// A missing file is not an error: the store starts empty and the
    /// file is created on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file exists but cannot be
    /// read, or [`StoreError::Decode`] if any row is malformed (the
    /// first bad row aborts the whole load).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut tasks = match std::fs::read_to_string(&path) {
            Ok(contents) => codec::decode_log(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        sort_by_date(&mut tasks);
        tracing::info!(entries = tasks.len(), path = %path.display(), "opened work log");
        Ok(Self { path, tasks })
    }

    /// Adds a new entry, keeping the sequence sorted, and persists.
    ///
    /// Returns the new entry's id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the log cannot be persisted.
    pub fn add(&mut self, draft: TaskDraft) -> Result<EntryId, StoreError> {
        let task = Task::from_draft(draft);
        let id = task.id();
        self.insert_sorted(task);
        self.persist()?;
        tracing::debug!(%id, "added entry");
        Ok(id)
    }

    /// Replaces the content of the entry at `index` in `view`, re-sorts
    /// the store (the date may have changed) and persists.
    ///
    /// Returns `index` unchanged; the entry stays under the same view
    /// slot even when its new date moved it within the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the log cannot be persisted.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `view`, or if the id at
    /// that slot is not in the store — both are caller bugs.
    pub fn edit(
        &mut self,
        index: usize,
        view: &[EntryId],
        draft: TaskDraft,
    ) -> Result<usize, StoreError> {
        let id = view[index];
        let pos = self.position(id);
        self.tasks[pos].replace_content(draft);
        sort_by_date(&mut self.tasks);
        self.persist()?;
        tracing::debug!(%id, "edited entry");
        Ok(index)
    }

    /// Deletes the entry at `index` in `view` when `confirmed` is true,
    /// removing it from both the store and the view, and persists.
    ///
    /// When `confirmed` is false nothing changes and `index` is returned.
    /// On deletion the adjusted cursor is returned: `index - 1` when
    /// `index > 1`, otherwise `0`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the log cannot be persisted.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `view`, or if the id at
    /// that slot is not in the store — both are caller bugs.
    pub fn delete(
        &mut self,
        index: usize,
        view: &mut Vec<EntryId>,
        confirmed: bool,
    ) -> Result<usize, StoreError> {
        if !confirmed {
            return Ok(index);
        }
        let id = view[index];
        let pos = self.position(id);
        self.tasks.remove(pos);
        view.remove(index);
        self.persist()?;
        tracing::debug!(%id, "deleted entry");
        Ok(if index > 1 { index - 1 } else { 0 })
    }

    /// Rewrites the backing file with the full sorted sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the file cannot be written; the
    /// store never reports success for an unsaved mutation.
    pub fn persist(&self) -> Result<(), StoreError> {
        let contents = codec::encode_log(&self.tasks);
        std::fs::write(&self.path, contents).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(entries = self.tasks.len(), "persisted work log");
        Ok(())
    }

    /// Returns the sorted entries.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Returns a view of the full store, in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntryId> {
        self.tasks.iter().map(Task::id).collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true when the log has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts scanning from the tail: the new entry lands immediately
    /// after the last entry with `date <= task.date`, so equal dates
    /// keep insertion order.
    fn insert_sorted(&mut self, task: Task) {
        let mut i = self.tasks.len();
        while i > 0 && self.tasks[i - 1].date() > task.date() {
            i -= 1;
        }
        self.tasks.insert(i, task);
    }

    fn position(&self, id: EntryId) -> usize {
        self.tasks
            .iter()
            .position(|t| t.id() == id)
            .unwrap_or_else(|| panic!("entry {id} is not in the store"))
    }
}

/// Stable insertion sort by date, oldest first.
///
/// Deliberately quadratic: the log is small and the stability of the
/// adjacent-swap walk is the property the store relies on.
fn sort_by_date(tasks: &mut [Task]) {
    for i in 1..tasks.len() {
        let mut j = i;
        while j > 0 && tasks[j - 1].date() > tasks[j].date() {
            tasks.swap(j - 1, j);
            j -= 1;
        }
    }
}
