//! Integration tests for the search strategies over a store-backed log.

#![allow(clippy::unwrap_used)]

use regex::Regex;
use worklog::search::{self, SearchQuery};
use worklog::store::TaskStore;
use worklog_record::record::{EntryId, Task, TaskDraft, parse_date};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn draft(date: &str, title: &str, time: u32, notes: Option<&str>) -> TaskDraft {
    TaskDraft::new(
        parse_date(date).unwrap(),
        title,
        time,
        notes.map(String::from),
    )
    .unwrap()
}

/// A store seeded with the two reference entries used throughout.
fn reference_store(dir: &tempfile::TempDir) -> TaskStore {
    let mut store = TaskStore::open(dir.path().join("log.csv")).unwrap();
    store
        .add(draft(
            "17/03/2018",
            "Review some projects",
            60,
            Some("Do some work at the office."),
        ))
        .unwrap();
    store
        .add(draft(
            "05/11/2017",
            "Test project",
            60,
            Some("Nothing relevant"),
        ))
        .unwrap();
    store
}

fn resolve_titles(store: &TaskStore, ids: &[EntryId]) -> Vec<String> {
    ids.iter()
        .map(|id| store.get(*id).map(Task::title).unwrap().to_string())
        .collect()
}

// --- strategy tests over the reference log ---

#[test]
fn exact_time_returns_both_in_date_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = reference_store(&dir);
    let found = search::run(store.tasks(), &SearchQuery::TimeSpent(60));
    assert_eq!(
        resolve_titles(&store, &found),
        ["Test project", "Review some projects"]
    );
}

#[test]
fn exact_text_matches_title_and_notes_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let store = reference_store(&dir);
    let found = search::run(store.tasks(), &SearchQuery::Text("project".to_string()));
    assert_eq!(found.len(), 2);
    let found = search::run(store.tasks(), &SearchQuery::Text("OFFICE".to_string()));
    assert_eq!(resolve_titles(&store, &found), ["Review some projects"]);
}

#[test]
fn range_across_2018_returns_only_the_second() {
    let dir = tempfile::tempdir().unwrap();
    let store = reference_store(&dir);
    let query = SearchQuery::DateRange {
        start: parse_date("01/01/2018").unwrap(),
        end: parse_date("01/01/2019").unwrap(),
    };
    let found = search::run(store.tasks(), &query);
    assert_eq!(resolve_titles(&store, &found), ["Review some projects"]);
}

#[test]
fn range_endpoints_are_inclusive() {
    let dir = tempfile::tempdir().unwrap();
    let store = reference_store(&dir);
    let on_start = SearchQuery::DateRange {
        start: parse_date("05/11/2017").unwrap(),
        end: parse_date("31/12/2017").unwrap(),
    };
    assert_eq!(search::run(store.tasks(), &on_start).len(), 1);
    let on_end = SearchQuery::DateRange {
        start: parse_date("01/01/2018").unwrap(),
        end: parse_date("17/03/2018").unwrap(),
    };
    assert_eq!(search::run(store.tasks(), &on_end).len(), 1);
}

#[test]
fn exact_date_not_present_is_empty_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = reference_store(&dir);
    let query = SearchQuery::ExactDate(parse_date("01/01/2000").unwrap());
    assert!(search::run(store.tasks(), &query).is_empty());
}

#[test]
fn regex_matching_only_notes_still_includes_the_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = reference_store(&dir);
    let query = SearchQuery::Pattern(Regex::new(r"office\.$").unwrap());
    let found = search::run(store.tasks(), &query);
    assert_eq!(resolve_titles(&store, &found), ["Review some projects"]);
}

#[test]
fn regex_on_entry_without_notes_matches_title_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = TaskStore::open(dir.path().join("log.csv")).unwrap();
    store
        .add(draft("05/11/2017", "Test project", 60, None))
        .unwrap();
    // A pattern that would only have matched notes excludes the entry.
    assert!(search::run(store.tasks(), &SearchQuery::Pattern(Regex::new("office").unwrap())).is_empty());
    // A title match still works without notes.
    assert_eq!(
        search::run(store.tasks(), &SearchQuery::Pattern(Regex::new(r"^Test").unwrap())).len(),
        1
    );
}

// --- view consistency tests ---

#[test]
fn search_result_ids_resolve_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = reference_store(&dir);
    let found = search::run(store.tasks(), &SearchQuery::TimeSpent(60));
    for id in &found {
        assert!(store.get(*id).is_some());
    }
}

#[test]
fn deleting_from_a_search_view_shrinks_store_and_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = reference_store(&dir);
    let mut view = search::run(store.tasks(), &SearchQuery::TimeSpent(60));
    assert_eq!(view.len(), 2);
    let doomed = view[0];
    store.delete(0, &mut view, true).unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(store.len(), 1);
    assert!(store.get(doomed).is_none());
}

#[test]
fn search_after_edit_sees_new_content() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = reference_store(&dir);
    let view = search::run(store.tasks(), &SearchQuery::Text("Test project".to_string()));
    assert_eq!(view.len(), 1);
    store
        .edit(0, &view, draft("05/11/2017", "Renamed entry", 60, None))
        .unwrap();
    assert!(search::run(store.tasks(), &SearchQuery::Text("Test project".to_string())).is_empty());
    assert_eq!(
        search::run(store.tasks(), &SearchQuery::Text("renamed".to_string())).len(),
        1
    );
}
