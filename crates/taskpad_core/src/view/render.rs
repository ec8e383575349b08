//! Plain-text render functions.

use super::route::Route;
use crate::model::task::Task;

pub const HOME_TITLE: &str = "Task Manager";
pub const SETTINGS_TITLE: &str = "Settings";
const INPUT_PLACEHOLDER: &str = "Enter a task...";

/// Inputs for one full screen.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub route: Route,
    pub tasks: &'a [Task],
    /// Incomplete tasks among `tasks`.
    pub remaining: usize,
    pub draft: &'a str,
    pub dark_mode: bool,
    pub notification: Option<&'a str>,
}

/// Renders notification bar, navigation bar, and the active view.
pub fn render_screen(screen: &Screen<'_>) -> String {
    let mut out = String::new();
    if let Some(message) = screen.notification {
        out.push_str(&render_notification(message));
        out.push('\n');
    }
    out.push_str(&render_nav(screen.route));
    out.push('\n');
    match screen.route {
        Route::Home => out.push_str(&render_home(screen.tasks, screen.remaining, screen.draft)),
        Route::Settings => out.push_str(&render_settings(screen.dark_mode)),
    }
    out
}

pub fn render_notification(message: &str) -> String {
    format!("== {message} ==")
}

/// Navigation links; the active one is starred.
pub fn render_nav(active: Route) -> String {
    Route::ALL
        .iter()
        .map(|route| {
            let marker = if *route == active { "*" } else { " " };
            format!("[{marker}{} {}]", route.label(), route.path())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title, input line, task rows, and a remaining-count footer once the
/// list is non-empty.
pub fn render_home(tasks: &[Task], remaining: usize, draft: &str) -> String {
    let mut lines = vec![HOME_TITLE.to_string()];
    if draft.is_empty() {
        lines.push(format!("> ({INPUT_PLACEHOLDER})"));
    } else {
        lines.push(format!("> {draft}"));
    }
    lines.extend(tasks.iter().map(render_task));
    if !tasks.is_empty() {
        lines.push(format!("{remaining} of {} remaining", tasks.len()));
    }
    lines.join("\n")
}

pub fn render_task(task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!("  [{mark}] {} {}", task.id, task.text)
}

pub fn render_settings(dark_mode: bool) -> String {
    let mark = if dark_mode { 'x' } else { ' ' };
    format!("{SETTINGS_TITLE}\nEnable Dark Mode: [{mark}]")
}

#[cfg(test)]
mod tests {
    use super::{render_home, render_nav, render_screen, render_settings, Screen};
    use crate::model::task::{Task, TaskId};
    use crate::view::route::Route;

    #[test]
    fn home_lists_tasks_in_order_with_markers() {
        let mut done = Task::new(TaskId(2), "Walk dog");
        done.completed = true;
        let tasks = vec![Task::new(TaskId(1), "Buy milk"), done];

        let text = render_home(&tasks, 1, "");
        assert_eq!(
            text,
            "Task Manager\n> (Enter a task...)\n  [ ] 1 Buy milk\n  [x] 2 Walk dog\n1 of 2 remaining"
        );
    }

    #[test]
    fn empty_home_has_no_footer() {
        assert_eq!(render_home(&[], 0, "Buy"), "Task Manager\n> Buy");
    }

    #[test]
    fn settings_shows_checked_state() {
        assert!(render_settings(true).ends_with("Enable Dark Mode: [x]"));
        assert!(render_settings(false).ends_with("Enable Dark Mode: [ ]"));
    }

    #[test]
    fn nav_marks_active_route() {
        assert_eq!(render_nav(Route::Settings), "[ Home /] [*Settings /settings]");
    }

    #[test]
    fn screen_puts_notification_first() {
        let screen = Screen {
            route: Route::Settings,
            tasks: &[],
            remaining: 0,
            draft: "",
            dark_mode: false,
            notification: Some("Task added!"),
        };
        let text = render_screen(&screen);
        assert!(text.starts_with("== Task added! ==\n"));
        assert!(text.contains("Enable Dark Mode"));
    }
}
