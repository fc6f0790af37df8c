//! Search strategies over the work log.
//!
//! Five independent strategies expressed as a [`SearchQuery`] command
//! enum with a single dispatcher, so adding a strategy means adding a
//! variant and an arm rather than wiring up dynamic dispatch. Strategies
//! filter a supplied sequence of entries; the result preserves the input
//! order (the store's date order) and may be empty — an empty result is
//! a valid outcome, not an error.

use chrono::NaiveDate;
use regex::Regex;

use worklog_record::record::{EntryId, Task};

/// One search strategy with its criteria.
///
/// Criteria are validated before a query is built: dates and minute
/// counts come out of the prompt layer's retry loops, and a
/// [`SearchQuery::Pattern`] carries an already-compiled regex.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Entries on exactly this date.
    ExactDate(NaiveDate),
    /// Entries with `start <= date <= end`, inclusive on both ends.
    ///
    /// No cross-validation of `start <= end`: an inverted range simply
    /// matches nothing.
    DateRange {
        /// First date of the range.
        start: NaiveDate,
        /// Last date of the range.
        end: NaiveDate,
    },
    /// Entries with exactly this many minutes spent.
    TimeSpent(u32),
    /// Case-insensitive substring match over title, and over notes when
    /// present. An entry without notes is matched on title alone.
    Text(String),
    /// Regex search (match anywhere) over title, and over notes when
    /// present.
    Pattern(Regex),
}

/// Runs a query over a sequence of entries.
#[must_use]
pub fn run(tasks: &[Task], query: &SearchQuery) -> Vec<EntryId> {
    match query {
        SearchQuery::ExactDate(date) => collect(tasks, |t| t.date() == *date),
        SearchQuery::DateRange { start, end } => {
            collect(tasks, |t| *start <= t.date() && t.date() <= *end)
        }
        SearchQuery::TimeSpent(minutes) => collect(tasks, |t| t.time() == *minutes),
        SearchQuery::Text(needle) => {
            let needle = needle.to_lowercase();
            collect(tasks, |t| {
                t.title().to_lowercase().contains(&needle)
                    || t.notes()
                        .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
        }
        SearchQuery::Pattern(pattern) => collect(tasks, |t| {
            pattern.is_match(t.title()) || t.notes().is_some_and(|n| pattern.is_match(n))
        }),
    }
}

fn collect(tasks: &[Task], keep: impl Fn(&Task) -> bool) -> Vec<EntryId> {
    tasks.iter().filter(|t| keep(t)).map(Task::id).collect()
}
