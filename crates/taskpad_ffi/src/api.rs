//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task and preference operations to Dart via FRB.
//! - Hand the notification text back to the UI with each mutation.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens its own connection; no session state lives here.
//! - The UI owns the document theme; this layer only persists the flag.

use log::error;
use std::path::PathBuf;
use std::sync::OnceLock;
use taskpad_core::app::{TASK_ADDED, TASK_DELETED, TASK_UPDATED};
use taskpad_core::db::open_db;
use taskpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Clock, PreferenceStore, SqliteKeyValueStore, StoreResult, SystemClock, Task, TaskId,
    TaskStore, TaskpadConfig, Theme, ThemeTarget,
};

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Task row as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// Response envelope for task list reads and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the call reached storage successfully.
    pub ok: bool,
    /// Notification text on success, error description on failure.
    pub message: String,
    /// Full task list after the call, in display order.
    pub tasks: Vec<TaskItem>,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, tasks: &[Task]) -> Self {
        Self {
            ok: true,
            message: message.into(),
            tasks: tasks.iter().map(to_task_item).collect(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            tasks: Vec::new(),
        }
    }
}

/// Dark-mode response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceResponse {
    pub ok: bool,
    pub dark_mode: bool,
    /// Empty on success.
    pub message: String,
}

/// Lists persisted tasks in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list() -> TaskActionResponse {
    respond("tasks_list", |_| Ok(""))
}

/// Adds a task. Blank text is ignored and yields an empty message.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String) -> TaskActionResponse {
    let now_ms = SystemClock.now_ms();
    respond("task_add", |tasks| {
        let added = tasks.add_task(&text, now_ms)?;
        Ok(if added.is_some() { TASK_ADDED } else { "" })
    })
}

/// Toggles completion of `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: i64) -> TaskActionResponse {
    respond("task_toggle", |tasks| {
        tasks.toggle_task(TaskId(id))?;
        Ok(TASK_UPDATED)
    })
}

/// Deletes `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: i64) -> TaskActionResponse {
    respond("task_delete", |tasks| {
        tasks.delete_task(TaskId(id))?;
        Ok(TASK_DELETED)
    })
}

/// Reads the persisted dark-mode flag.
#[flutter_rust_bridge::frb(sync)]
pub fn dark_mode_get() -> PreferenceResponse {
    with_preferences("dark_mode_get", |prefs| Ok(prefs.dark_mode()))
}

/// Persists the dark-mode flag.
#[flutter_rust_bridge::frb(sync)]
pub fn dark_mode_set(value: bool) -> PreferenceResponse {
    with_preferences("dark_mode_set", |prefs| {
        prefs.set_dark_mode(value, &mut ThemeSink)?;
        Ok(prefs.dark_mode())
    })
}

/// The Dart side applies the theme from the returned flag.
struct ThemeSink;

impl ThemeTarget for ThemeSink {
    fn apply_theme(&mut self, _theme: Theme) {}
}

fn respond(
    operation: &'static str,
    f: impl FnOnce(&mut TaskStore<SqliteKeyValueStore<'_>>) -> StoreResult<&'static str>,
) -> TaskActionResponse {
    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=ffi_call module=ffi status=error op={operation} error_code=db_open_failed");
            return TaskActionResponse::failure(format!("{operation} failed: {err}"));
        }
    };

    let result = TaskStore::load(SqliteKeyValueStore::new(&conn)).and_then(|mut tasks| {
        let message = f(&mut tasks)?;
        Ok(TaskActionResponse::success(message, tasks.tasks()))
    });
    result.unwrap_or_else(|err| {
        error!("event=ffi_call module=ffi status=error op={operation} error={err}");
        TaskActionResponse::failure(format!("{operation} failed: {err}"))
    })
}

fn with_preferences(
    operation: &'static str,
    f: impl FnOnce(&mut PreferenceStore<SqliteKeyValueStore<'_>>) -> StoreResult<bool>,
) -> PreferenceResponse {
    let failure = |message: String| PreferenceResponse {
        ok: false,
        dark_mode: false,
        message,
    };

    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=ffi_call module=ffi status=error op={operation} error_code=db_open_failed");
            return failure(format!("{operation} failed: {err}"));
        }
    };

    match PreferenceStore::load(SqliteKeyValueStore::new(&conn)).and_then(|mut prefs| f(&mut prefs)) {
        Ok(dark_mode) => PreferenceResponse {
            ok: true,
            dark_mode,
            message: String::new(),
        },
        Err(err) => {
            error!("event=ffi_call module=ffi status=error op={operation} error={err}");
            failure(format!("{operation} failed: {err}"))
        }
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| TaskpadConfig::from_env().db_path)
        .clone()
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.0,
        text: task.text.clone(),
        completed: task.completed,
    }
}
