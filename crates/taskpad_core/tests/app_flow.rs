use taskpad_core::db::open_db;
use taskpad_core::{
    App, AppEvent, KeyValueStore, ManualClock, Route, SqliteKeyValueStore, DARK_MODE_KEY,
};

#[test]
fn dark_mode_persists_and_applies_theme_class() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("app.db")).unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let clock = ManualClock::new(0);
    let mut app = App::load(store, &clock).unwrap();

    app.dispatch(AppEvent::SetDarkMode(true)).unwrap();

    assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    assert!(app.document().has_class("dark"));
}

#[test]
fn session_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let clock = ManualClock::new(1_700_000_000_000);

    let before = {
        let conn = open_db(&path).unwrap();
        let mut app = App::load(SqliteKeyValueStore::new(&conn), &clock).unwrap();
        for text in ["Buy milk", "Walk dog"] {
            app.dispatch(AppEvent::EditDraft(text.to_string())).unwrap();
            app.dispatch(AppEvent::SubmitDraft).unwrap();
            clock.advance(10);
        }
        let first = app.tasks()[0].id;
        app.dispatch(AppEvent::ToggleTask(first)).unwrap();
        app.dispatch(AppEvent::SetDarkMode(true)).unwrap();
        app.tasks().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let app = App::load(SqliteKeyValueStore::new(&conn), &clock).unwrap();

    assert_eq!(app.tasks(), before.as_slice());
    assert!(app.dark_mode());
    assert!(app.document().has_class("dark"));
    assert_eq!(app.route(), Route::Home);
    assert_eq!(app.notification(), None);
}

#[test]
fn rendered_home_view_tracks_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("app.db")).unwrap();
    let clock = ManualClock::new(42);
    let mut app = App::load(SqliteKeyValueStore::new(&conn), &clock).unwrap();

    app.dispatch(AppEvent::EditDraft("Buy milk".to_string()))
        .unwrap();
    app.dispatch(AppEvent::SubmitDraft).unwrap();

    let screen = app.render();
    assert!(screen.starts_with("== Task added! ==\n"));
    assert!(screen.contains("  [ ] 42 Buy milk"));
    assert!(screen.ends_with("1 of 1 remaining"));

    app.dispatch(AppEvent::ToggleTask(taskpad_core::TaskId(42)))
        .unwrap();
    let screen = app.render();
    assert!(screen.contains("  [x] 42 Buy milk"));
    assert!(screen.ends_with("0 of 1 remaining"));
}
