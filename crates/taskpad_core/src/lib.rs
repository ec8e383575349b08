//! Core domain logic for Taskpad.
//! This crate owns the task list, the dark-mode preference and their
//! persisted key-value representation.

pub mod app;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notification;
pub mod service;
pub mod storage;
pub mod view;

pub use app::{App, AppEvent};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TaskpadConfig;
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::task::{Task, TaskId};
pub use model::theme::Theme;
pub use notification::{NotificationSlot, NOTIFICATION_TTL_MS};
pub use service::preference_store::{PreferenceStore, DARK_MODE_KEY};
pub use service::task_store::{TaskStore, TASKS_KEY};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use view::document::{DocumentRoot, ThemeTarget};
pub use view::route::Route;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
