//! Application root composing the stores, notification slot and views.
//!
//! # Responsibility
//! - Own all session state explicitly; views receive it by reference.
//! - Translate discrete input events into store mutations.
//! - Notify subscribers after every dispatched event.
//!
//! # Invariants
//! - Events are handled one at a time, in arrival order.
//! - Each dispatch first expires a stale notification.

use crate::clock::Clock;
use crate::model::task::{Task, TaskId};
use crate::notification::NotificationSlot;
use crate::service::preference_store::PreferenceStore;
use crate::service::task_store::TaskStore;
use crate::storage::{KeyValueStore, StoreResult};
use crate::view::document::DocumentRoot;
use crate::view::render::{render_screen, Screen};
use crate::view::route::Route;
use log::info;

pub const TASK_ADDED: &str = "Task added!";
pub const TASK_UPDATED: &str = "Task updated!";
pub const TASK_DELETED: &str = "Task deleted!";

/// User input understood by [`App::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Navigate(Route),
    EditDraft(String),
    SubmitDraft,
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    SetDarkMode(bool),
    ToggleDarkMode,
    /// Lets time pass without other input.
    Tick,
}

type Subscriber<S, C> = Box<dyn FnMut(&App<S, C>)>;

pub struct App<S: KeyValueStore + Clone, C: Clock> {
    tasks: TaskStore<S>,
    preferences: PreferenceStore<S>,
    notification: NotificationSlot,
    document: DocumentRoot,
    draft: String,
    route: Route,
    clock: C,
    subscribers: Vec<Subscriber<S, C>>,
}

impl<S: KeyValueStore + Clone, C: Clock> App<S, C> {
    /// Restores tasks and preference from `store` and applies the theme.
    pub fn load(store: S, clock: C) -> StoreResult<Self> {
        let tasks = TaskStore::load(store.clone())?;
        let preferences = PreferenceStore::load(store)?;
        let mut document = DocumentRoot::default();
        preferences.apply(&mut document);

        info!(
            "event=app_load module=app status=ok task_count={} dark_mode={}",
            tasks.len(),
            preferences.dark_mode()
        );

        Ok(Self {
            tasks,
            preferences,
            notification: NotificationSlot::new(),
            document,
            draft: String::new(),
            route: Route::default(),
            clock,
            subscribers: Vec::new(),
        })
    }

    /// Registers `subscriber` to run after every dispatch.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&App<S, C>) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Handles one event, then notifies subscribers.
    ///
    /// An event that fails to persist leaves tasks, draft, theme and
    /// notification as they were; subscribers still run.
    pub fn dispatch(&mut self, event: AppEvent) -> StoreResult<()> {
        let now_ms = self.clock.now_ms();
        self.notification.tick(now_ms);
        let result = self.handle(event, now_ms);
        self.notify_subscribers();
        result
    }

    fn handle(&mut self, event: AppEvent, now_ms: i64) -> StoreResult<()> {
        match event {
            AppEvent::Navigate(route) => self.route = route,
            AppEvent::EditDraft(text) => self.draft = text,
            AppEvent::SubmitDraft => {
                if self.tasks.add_task(&self.draft, now_ms)?.is_some() {
                    self.draft.clear();
                    self.notification.show(TASK_ADDED, now_ms);
                }
            }
            AppEvent::ToggleTask(id) => {
                self.tasks.toggle_task(id)?;
                self.notification.show(TASK_UPDATED, now_ms);
            }
            AppEvent::DeleteTask(id) => {
                self.tasks.delete_task(id)?;
                self.notification.show(TASK_DELETED, now_ms);
            }
            AppEvent::SetDarkMode(value) => {
                self.preferences.set_dark_mode(value, &mut self.document)?;
            }
            AppEvent::ToggleDarkMode => {
                self.preferences.toggle_dark_mode(&mut self.document)?;
            }
            AppEvent::Tick => {}
        }
        Ok(())
    }

    fn notify_subscribers(&mut self) {
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for subscriber in subscribers.iter_mut() {
            subscriber(&*self);
        }
        subscribers.append(&mut self.subscribers);
        self.subscribers = subscribers;
    }

    /// Text of the active view, notification bar included.
    pub fn render(&self) -> String {
        render_screen(&Screen {
            route: self.route,
            tasks: self.tasks.tasks(),
            remaining: self.tasks.remaining(),
            draft: &self.draft,
            dark_mode: self.preferences.dark_mode(),
            notification: self.notification.current(),
        })
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn dark_mode(&self) -> bool {
        self.preferences.dark_mode()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.current()
    }

    pub fn document(&self) -> &DocumentRoot {
        &self.document
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn route(&self) -> Route {
        self.route
    }
}

#[cfg(test)]
mod tests {
    use super::{App, AppEvent, TASK_ADDED, TASK_DELETED, TASK_UPDATED};
    use crate::clock::ManualClock;
    use crate::db::open_db_in_memory;
    use crate::model::task::TaskId;
    use crate::notification::NOTIFICATION_TTL_MS;
    use crate::service::task_store::TaskStore;
    use crate::storage::{MemoryKeyValueStore, SqliteKeyValueStore};
    use crate::view::route::Route;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn blank_submit_keeps_draft_and_shows_nothing() {
        let store = MemoryKeyValueStore::new();
        let clock = ManualClock::new(1);
        let mut app = App::load(&store, &clock).unwrap();

        app.dispatch(AppEvent::EditDraft("   ".to_string())).unwrap();
        app.dispatch(AppEvent::SubmitDraft).unwrap();

        assert!(app.tasks().is_empty());
        assert_eq!(app.draft(), "   ");
        assert_eq!(app.notification(), None);
    }

    #[test]
    fn submit_clears_draft_and_notifies() {
        let store = MemoryKeyValueStore::new();
        let clock = ManualClock::new(1_000);
        let mut app = App::load(&store, &clock).unwrap();

        app.dispatch(AppEvent::EditDraft("Buy milk".to_string()))
            .unwrap();
        app.dispatch(AppEvent::SubmitDraft).unwrap();

        assert_eq!(app.draft(), "");
        assert_eq!(app.notification(), Some(TASK_ADDED));
        assert_eq!(app.tasks()[0].id, TaskId(1_000));
    }

    #[test]
    fn notification_expires_on_later_dispatch() {
        let store = MemoryKeyValueStore::new();
        let clock = ManualClock::new(0);
        let mut app = App::load(&store, &clock).unwrap();

        app.dispatch(AppEvent::ToggleTask(TaskId(5))).unwrap();
        assert_eq!(app.notification(), Some(TASK_UPDATED));

        clock.advance(NOTIFICATION_TTL_MS);
        app.dispatch(AppEvent::Tick).unwrap();
        assert_eq!(app.notification(), None);
    }

    #[test]
    fn delete_replaces_pending_notification() {
        let store = MemoryKeyValueStore::new();
        let clock = ManualClock::new(0);
        let mut app = App::load(&store, &clock).unwrap();

        app.dispatch(AppEvent::EditDraft("a".to_string())).unwrap();
        app.dispatch(AppEvent::SubmitDraft).unwrap();
        clock.advance(2_000);
        app.dispatch(AppEvent::DeleteTask(TaskId(0))).unwrap();
        clock.advance(2_000);
        app.dispatch(AppEvent::Tick).unwrap();

        assert!(app.tasks().is_empty());
        assert_eq!(app.notification(), Some(TASK_DELETED));
    }

    #[test]
    fn subscribers_see_state_after_each_dispatch() {
        let store = MemoryKeyValueStore::new();
        let clock = ManualClock::new(0);
        let mut app = App::load(&store, &clock).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        app.subscribe(move |app| sink.borrow_mut().push(app.route()));

        app.dispatch(AppEvent::Navigate(Route::Settings)).unwrap();
        app.dispatch(AppEvent::Navigate(Route::Home)).unwrap();

        assert_eq!(*seen.borrow(), vec![Route::Settings, Route::Home]);
    }

    #[test]
    fn dark_mode_events_update_document_and_settings_view() {
        let store = MemoryKeyValueStore::new();
        let clock = ManualClock::new(0);
        let mut app = App::load(&store, &clock).unwrap();

        app.dispatch(AppEvent::Navigate(Route::Settings)).unwrap();
        app.dispatch(AppEvent::ToggleDarkMode).unwrap();

        assert!(app.dark_mode());
        assert!(app.document().has_class("dark"));
        assert!(app.render().ends_with("Enable Dark Mode: [x]"));
    }

    #[test]
    fn failed_submit_keeps_draft_for_retry() {
        let conn = open_db_in_memory().unwrap();
        let clock = ManualClock::new(1_000);
        let mut app = App::load(SqliteKeyValueStore::new(&conn), &clock).unwrap();
        app.dispatch(AppEvent::EditDraft("Buy milk".to_string()))
            .unwrap();

        conn.execute_batch("PRAGMA query_only = ON;").unwrap();
        assert!(app.dispatch(AppEvent::SubmitDraft).is_err());
        assert_eq!(app.draft(), "Buy milk");
        assert_eq!(app.notification(), None);
        assert!(app.tasks().is_empty());

        conn.execute_batch("PRAGMA query_only = OFF;").unwrap();
        app.dispatch(AppEvent::SubmitDraft).unwrap();
        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.notification(), Some(TASK_ADDED));
        let persisted = TaskStore::load(SqliteKeyValueStore::new(&conn)).unwrap();
        assert_eq!(persisted.tasks(), app.tasks());
    }
}
