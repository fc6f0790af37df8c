//! Menu loops for the terminal front end.
//!
//! Three loops: the main menu, the search-strategy menu, and the browse
//! loop over a navigator session. Each renders a title and its options,
//! then reads keys until one maps to a valid action. Actions are command
//! enums with an explicit key mapping and a single dispatcher per loop —
//! no runtime method lookup. All loops are generic over the reader and
//! writer so whole sessions can be driven by scripted input in tests.

use std::io::{self, BufRead, Write};

use worklog_record::record::{EntryId, Task};

use crate::browse::{BrowseAction, Navigator};
use crate::config::AppConfig;
use crate::prompt;
use crate::screen;
use crate::search::{self, SearchQuery};
use crate::store::{StoreError, TaskStore};

/// Errors that can abort a menu session.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// Terminal I/O failed, or input ended mid-session.
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),

    /// A store operation failed; the session must not continue as if
    /// the mutation had been saved.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Top-level menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    /// Create and add a new entry.
    Add,
    /// Search existing entries.
    Search,
    /// Quit the program.
    Quit,
}

impl MainAction {
    /// All actions, in display order.
    pub const ALL: [Self; 3] = [Self::Add, Self::Search, Self::Quit];

    /// The key that selects this action.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Add => 'a',
            Self::Search => 'b',
            Self::Quit => 'c',
        }
    }

    /// The label shown next to the key.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "Add new entry",
            Self::Search => "Search in existing entries",
            Self::Quit => "Quit program",
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

/// Search menu actions: the five strategies plus return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    /// Search by exact date.
    ExactDate,
    /// Search by inclusive date range.
    DateRange,
    /// Search by exact minutes spent.
    TimeSpent,
    /// Case-insensitive substring search.
    ExactText,
    /// Regular expression search.
    Pattern,
    /// Back to the main menu.
    Return,
}

impl SearchAction {
    /// All actions, in display order.
    pub const ALL: [Self; 6] = [
        Self::ExactDate,
        Self::DateRange,
        Self::TimeSpent,
        Self::ExactText,
        Self::Pattern,
        Self::Return,
    ];

    /// The key that selects this action.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::ExactDate => 'a',
            Self::DateRange => 'b',
            Self::TimeSpent => 'c',
            Self::ExactText => 'd',
            Self::Pattern => 'e',
            Self::Return => 'f',
        }
    }

    /// The label shown next to the key.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExactDate => "Exact Date",
            Self::DateRange => "Range of Dates",
            Self::TimeSpent => "Time Spent",
            Self::ExactText => "Exact Search",
            Self::Pattern => "Regex Pattern",
            Self::Return => "Return to menu",
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

/// Runs the main menu loop until the user quits.
///
/// # Errors
///
/// Returns [`MenuError`] when terminal I/O fails (including input ending
/// mid-session) or a store mutation cannot be persisted.
pub fn run<R: BufRead, W: Write>(
    store: &mut TaskStore,
    config: &AppConfig,
    input: &mut R,
    out: &mut W,
) -> Result<(), MenuError> {
    tracing::info!("menu session started");
    loop {
        screen::clear(out)?;
        writeln!(out, "WORK LOG")?;
        writeln!(out, "What would you like to do?")?;
        for action in MainAction::ALL {
            writeln!(out, "{}) {}", action.key(), action.label())?;
        }
        match read_action(input, out, MainAction::from_key)? {
            MainAction::Add => add_entry(store, config, input, out)?,
            MainAction::Search => search_menu(store, config, input, out)?,
            MainAction::Quit => {
                tracing::info!("menu session ended");
                return Ok(());
            }
        }
    }
}

/// Browses a view of entries until the user returns.
///
/// The view is either the full store or a search result; an empty view
/// renders the empty state with only return available.
///
/// # Errors
///
/// Returns [`MenuError`] when terminal I/O fails or a store mutation
/// cannot be persisted.
pub fn browse<R: BufRead, W: Write>(
    store: &mut TaskStore,
    config: &AppConfig,
    view: Vec<EntryId>,
    input: &mut R,
    out: &mut W,
) -> Result<(), MenuError> {
    let mut nav = Navigator::new(view);
    loop {
        screen::clear(out)?;
        match nav.current().and_then(|id| store.get(id)) {
            Some(task) => {
                render_task(out, task, &config.date_format)?;
                writeln!(out, "Result {} of {}\n", nav.cursor() + 1, nav.len())?;
            }
            None => writeln!(out, "There are no tasks to show.\n")?,
        }

        let actions = nav.actions();
        let labels: Vec<&str> = actions.iter().map(|action| action.label()).collect();
        writeln!(out, "{}", labels.join(", "))?;

        let action = read_action(input, out, |key| {
            BrowseAction::from_key(key).filter(|action| actions.contains(action))
        })?;
        match action {
            BrowseAction::Previous => nav.previous(),
            BrowseAction::Next => nav.next(),
            BrowseAction::Edit => {
                let current = nav
                    .current()
                    .and_then(|id| store.get(id))
                    .map(|task| task.content().clone());
                if let Some(current) = current {
                    writeln!(out, "EDIT entry (Leave fields blank for no changes)")?;
                    let draft = prompt::draft(input, out, Some(&current))?;
                    nav.edit(store, draft)?;
                }
            }
            BrowseAction::Delete => {
                let confirmed =
                    prompt::confirm(input, out, "Do you really want to delete this task?")?;
                nav.delete(store, confirmed)?;
            }
            BrowseAction::Return => return Ok(()),
        }
    }
}

/// Creates a new entry, shows it, and waits for acknowledgment.
fn add_entry<R: BufRead, W: Write>(
    store: &mut TaskStore,
    config: &AppConfig,
    input: &mut R,
    out: &mut W,
) -> Result<(), MenuError> {
    screen::clear(out)?;
    let draft = prompt::draft(input, out, None)?;
    let id = store.add(draft)?;
    screen::clear(out)?;
    if let Some(task) = store.get(id) {
        render_task(out, task, &config.date_format)?;
    }
    prompt::pause(
        input,
        out,
        "The entry has been added. Press enter to return to the menu",
    )?;
    Ok(())
}

/// Runs the search-strategy menu until the user returns to the main menu.
fn search_menu<R: BufRead, W: Write>(
    store: &mut TaskStore,
    config: &AppConfig,
    input: &mut R,
    out: &mut W,
) -> Result<(), MenuError> {
    loop {
        screen::clear(out)?;
        writeln!(out, "Do you want to search by:")?;
        for action in SearchAction::ALL {
            writeln!(out, "{}) {}", action.key(), action.label())?;
        }
        let action = read_action(input, out, SearchAction::from_key)?;
        if action == SearchAction::Return {
            return Ok(());
        }

        screen::clear(out)?;
        let query = match action {
            SearchAction::ExactDate => {
                SearchQuery::ExactDate(prompt::date(input, out, "Date of the task", None)?)
            }
            SearchAction::DateRange => {
                let (start, end) = prompt::date_range(input, out)?;
                SearchQuery::DateRange { start, end }
            }
            SearchAction::TimeSpent => SearchQuery::TimeSpent(prompt::minutes(input, out, None)?),
            SearchAction::ExactText => SearchQuery::Text(prompt::text(input, out)?),
            SearchAction::Pattern => SearchQuery::Pattern(prompt::pattern(input, out)?),
            SearchAction::Return => return Ok(()),
        };

        let view = search::run(store.tasks(), &query);
        tracing::debug!(matches = view.len(), "search finished");
        browse(store, config, view, input, out)?;
    }
}

/// Renders one entry, omitting the notes line when absent.
fn render_task<W: Write>(out: &mut W, task: &Task, date_format: &str) -> io::Result<()> {
    writeln!(out, "Date: {}", task.date().format(date_format))?;
    writeln!(out, "Title: {}", task.title())?;
    writeln!(out, "Time spent: {} minutes", task.time())?;
    if let Some(notes) = task.notes() {
        writeln!(out, "Notes: {notes}")?;
    }
    writeln!(out)
}

/// Reads keys until one resolves to an action.
fn read_action<R: BufRead, W: Write, A>(
    input: &mut R,
    out: &mut W,
    resolve: impl Fn(char) -> Option<A>,
) -> Result<A, MenuError> {
    loop {
        let choice = prompt::choice(input, out)?;
        let mut chars = choice.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            if let Some(action) = resolve(key) {
                return Ok(action);
            }
        }
        writeln!(out, "Sorry, you must choose a valid option")?;
    }
}
