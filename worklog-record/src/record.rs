//! Work-log entry model: validated records with runtime identity.
//!
//! A [`Task`] is one dated work session (date, title, minutes spent,
//! optional notes). Content validation lives in [`TaskDraft`], which
//! carries no identity and is produced by the prompt layer or by the
//! file codec. An [`EntryId`] is assigned when a draft becomes a task
//! and is never persisted (the flat file has no id column); it lets
//! browse views keep referring to the same entry across re-sorts and
//! deletes.

use chrono::NaiveDate;
use uuid::Uuid;

/// Date format used in the persisted file: `DD/MM/YYYY`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Errors that can occur when constructing a record from field values.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Date text does not parse as `DD/MM/YYYY`.
    #[error("invalid date {value:?}: expected DD/MM/YYYY")]
    InvalidDate {
        /// The rejected date text.
        value: String,
    },
    /// Entry title must not be empty.
    #[error("entry title cannot be empty")]
    EmptyTitle,
    /// Time text is not a decimal minute count.
    #[error("invalid time spent {value:?}: expected minutes as a decimal integer")]
    InvalidTime {
        /// The rejected time text.
        value: String,
    },
    /// Minutes spent must be greater than zero.
    #[error("time spent must be greater than zero")]
    ZeroTime,
}

/// Unique runtime identifier for a work-log entry.
///
/// Random (UUID v4) rather than time-ordered: ordering in the log comes
/// from the entry date, not from creation time. Ids are assigned on load
/// or creation and never written to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a fresh entry identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an `EntryId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a date in the persisted `DD/MM/YYYY` format.
///
/// # Errors
///
/// Returns [`RecordError::InvalidDate`] if the text is not a valid
/// calendar date in that format.
pub fn parse_date(value: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| RecordError::InvalidDate {
        value: value.to_string(),
    })
}

/// Formats a date in the persisted `DD/MM/YYYY` format.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Validated entry content without identity.
///
/// Invariants: `title` is non-empty, `time` is greater than zero, and
/// `notes` is never `Some("")` (empty notes normalize to `None`, which
/// is how the file represents an absent notes column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Calendar date of the work session (day precision).
    pub date: NaiveDate,
    /// Short description of the work done.
    pub title: String,
    /// Minutes spent, greater than zero.
    pub time: u32,
    /// Optional free-form notes; absent is distinct from empty.
    pub notes: Option<String>,
}

impl TaskDraft {
    /// Creates a draft from already-typed field values.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyTitle`] if the title is empty, or
    /// [`RecordError::ZeroTime`] if the minute count is zero.
    pub fn new(
        date: NaiveDate,
        title: impl Into<String>,
        time: u32,
        notes: Option<String>,
    ) -> Result<Self, RecordError> {
        let title = title.into();
        if title.is_empty() {
            return Err(RecordError::EmptyTitle);
        }
        if time == 0 {
            return Err(RecordError::ZeroTime);
        }
        Ok(Self {
            date,
            title,
            time,
            notes: notes.filter(|n| !n.is_empty()),
        })
    }

    /// Creates a draft from the textual field values of a persisted row,
    /// re-validating every field.
    ///
    /// This is the path used when loading the flat file: a row that fails
    /// here is a malformed row, never a silently-accepted entry.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidDate`] for a bad date,
    /// [`RecordError::InvalidTime`] for a non-numeric time,
    /// [`RecordError::ZeroTime`] for a zero minute count, or
    /// [`RecordError::EmptyTitle`] for an empty title.
    pub fn parse(date: &str, title: &str, time: &str, notes: &str) -> Result<Self, RecordError> {
        let date = parse_date(date)?;
        let minutes: u32 = time.parse().map_err(|_| RecordError::InvalidTime {
            value: time.to_string(),
        })?;
        let notes = if notes.is_empty() {
            None
        } else {
            Some(notes.to_string())
        };
        Self::new(date, title, minutes, notes)
    }
}

/// One work-log entry: validated content plus runtime identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: EntryId,
    content: TaskDraft,
}

impl Task {
    /// Promotes a draft to a full entry with a fresh [`EntryId`].
    #[must_use]
    pub fn from_draft(content: TaskDraft) -> Self {
        Self {
            id: EntryId::new(),
            content,
        }
    }

    /// Returns this entry's identifier.
    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// Returns the entry date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.content.date
    }

    /// Returns the entry title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.content.title
    }

    /// Returns the minutes spent.
    #[must_use]
    pub const fn time(&self) -> u32 {
        self.content.time
    }

    /// Returns the notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.content.notes.as_deref()
    }

    /// Returns the entry content.
    #[must_use]
    pub const fn content(&self) -> &TaskDraft {
        &self.content
    }

    /// Replaces the entry content, keeping its identity.
    ///
    /// Used by edit: views holding this entry's id keep referring to it
    /// even when the new date moves it elsewhere in the sorted store.
    pub fn replace_content(&mut self, content: TaskDraft) {
        self.content = content;
    }
}
