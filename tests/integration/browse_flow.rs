//! Integration tests driving whole menu sessions with scripted input,
//! the way a user would type them.

#![allow(clippy::unwrap_used)]

use std::io::Cursor;

use worklog::config::AppConfig;
use worklog::menu;
use worklog::store::TaskStore;
use worklog_record::record::{Task, TaskDraft, parse_date};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn script(lines: &str) -> Cursor<Vec<u8>> {
    Cursor::new(lines.as_bytes().to_vec())
}

fn config(store: &TaskStore) -> AppConfig {
    AppConfig {
        data_file: store.path().to_path_buf(),
        date_format: "%d/%m/%Y".to_string(),
    }
}

fn draft(date: &str, title: &str, time: u32, notes: Option<&str>) -> TaskDraft {
    TaskDraft::new(
        parse_date(date).unwrap(),
        title,
        time,
        notes.map(String::from),
    )
    .unwrap()
}

fn seeded(dir: &tempfile::TempDir, rows: &[(&str, &str)]) -> TaskStore {
    let mut store = TaskStore::open(dir.path().join("log.csv")).unwrap();
    for (date, title) in rows {
        store.add(draft(date, title, 60, None)).unwrap();
    }
    store
}

fn titles(store: &TaskStore) -> Vec<&str> {
    store.tasks().iter().map(Task::title).collect()
}

fn rendered(out: &[u8]) -> String {
    String::from_utf8_lossy(out).into_owned()
}

// --- main menu sessions ---

#[test]
fn add_entry_then_quit() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(&dir, &[]);
    let cfg = config(&store);
    let mut input = script("a\n17/03/2018\nReview some projects\n60\n\n\nc\n");
    let mut out = Vec::new();

    menu::run(&mut store, &cfg, &mut input, &mut out).unwrap();

    assert_eq!(titles(&store), ["Review some projects"]);
    let text = rendered(&out);
    assert!(text.contains("WORK LOG"));
    assert!(text.contains("The entry has been added."));
    // The fresh entry is rendered back before the pause.
    assert!(text.contains("Date: 17/03/2018"));
    // And it reached the file before control returned.
    let reloaded = TaskStore::open(store.path()).unwrap();
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn search_by_time_then_delete_result() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(
        &dir,
        &[
            ("05/11/2017", "first"),
            ("17/03/2018", "second"),
            ("01/01/2019", "third"),
        ],
    );
    let cfg = config(&store);
    let mut input = script("b\nc\n60\nd\ny\nr\nf\nc\n");
    let mut out = Vec::new();

    menu::run(&mut store, &cfg, &mut input, &mut out).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(titles(&store), ["second", "third"]);
    assert!(rendered(&out).contains("Result 1 of 3"));
}

#[test]
fn empty_search_result_shows_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(&dir, &[("17/03/2018", "only entry")]);
    let cfg = config(&store);
    let mut input = script("b\na\n01/01/1999\nr\nf\nc\n");
    let mut out = Vec::new();

    menu::run(&mut store, &cfg, &mut input, &mut out).unwrap();

    assert_eq!(store.len(), 1);
    assert!(rendered(&out).contains("There are no tasks to show."));
}

#[test]
fn invalid_menu_key_is_refused_then_retried() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(&dir, &[]);
    let cfg = config(&store);
    let mut input = script("z\nc\n");
    let mut out = Vec::new();

    menu::run(&mut store, &cfg, &mut input, &mut out).unwrap();

    assert!(rendered(&out).contains("Sorry, you must choose a valid option"));
}

#[test]
fn input_ending_mid_session_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(&dir, &[]);
    let cfg = config(&store);
    let mut input = script("a\n");
    let mut out = Vec::new();

    let err = menu::run(&mut store, &cfg, &mut input, &mut out).unwrap_err();
    assert!(matches!(err, menu::MenuError::Io(_)));
}

// --- browse sessions ---

#[test]
fn browse_edit_keeps_blank_fields_and_saves_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(&dir, &[("05/11/2017", "first"), ("17/03/2018", "second")]);
    let cfg = config(&store);
    let view = store.ids();
    // Move to the second entry, edit only its title, then return.
    let mut input = script("n\ne\n\nEdited title\n\n\nr\n");
    let mut out = Vec::new();

    menu::browse(&mut store, &cfg, view, &mut input, &mut out).unwrap();

    assert_eq!(titles(&store), ["first", "Edited title"]);
    // The date survived the blank prompt and so did the time.
    assert_eq!(store.tasks()[1].date(), parse_date("17/03/2018").unwrap());
    assert_eq!(store.tasks()[1].time(), 60);
    let reloaded = TaskStore::open(store.path()).unwrap();
    assert_eq!(titles(&reloaded), ["first", "Edited title"]);
    assert!(rendered(&out).contains("EDIT entry (Leave fields blank for no changes)"));
}

#[test]
fn browse_edit_date_change_resorts_but_keeps_cursor_slot() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(&dir, &[("05/11/2017", "first"), ("17/03/2018", "second")]);
    let cfg = config(&store);
    let view = store.ids();
    // Edit the first entry's date past the second, then return.
    let mut input = script("e\n01/01/2019\n\n\n\nr\n");
    let mut out = Vec::new();

    menu::browse(&mut store, &cfg, view, &mut input, &mut out).unwrap();

    // Store re-sorted; the edited entry moved to the end.
    assert_eq!(titles(&store), ["second", "first"]);
    // The cursor slot still shows the edited entry after re-render.
    let text = rendered(&out);
    assert!(text.contains("Date: 01/01/2019"));
}

#[test]
fn browse_delete_only_entry_reaches_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(&dir, &[("17/03/2018", "only entry")]);
    let cfg = config(&store);
    let view = store.ids();
    // Delete, confirm, try an action the empty state doesn't offer,
    // then return.
    let mut input = script("d\ny\nn\nr\n");
    let mut out = Vec::new();

    menu::browse(&mut store, &cfg, view, &mut input, &mut out).unwrap();

    assert!(store.is_empty());
    let text = rendered(&out);
    assert!(text.contains("There are no tasks to show."));
    assert!(text.contains("Sorry, you must choose a valid option"));
}

#[test]
fn browse_unconfirmed_delete_keeps_the_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(&dir, &[("17/03/2018", "survivor")]);
    let cfg = config(&store);
    let view = store.ids();
    let mut input = script("d\nn\nr\n");
    let mut out = Vec::new();

    menu::browse(&mut store, &cfg, view, &mut input, &mut out).unwrap();

    assert_eq!(store.len(), 1);
    assert!(rendered(&out).contains("Do you really want to delete this task?"));
}

#[test]
fn browse_pages_forward_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded(
        &dir,
        &[
            ("05/11/2017", "first"),
            ("17/03/2018", "second"),
            ("01/01/2019", "third"),
        ],
    );
    let cfg = config(&store);
    let view = store.ids();
    let mut input = script("n\nn\np\nr\n");
    let mut out = Vec::new();

    menu::browse(&mut store, &cfg, view, &mut input, &mut out).unwrap();

    let text = rendered(&out);
    assert!(text.contains("Result 1 of 3"));
    assert!(text.contains("Result 2 of 3"));
    assert!(text.contains("Result 3 of 3"));
    // Paging options adapt: the first render offers no previous, the
    // last render offers no next.
    assert!(text.contains("[N]ext, [E]dit, [D]elete, [R]eturn"));
    assert!(text.contains("[P]revious, [E]dit, [D]elete, [R]eturn"));
}
