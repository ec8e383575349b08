//! Task record and identifier.
//!
//! # Invariants
//! - `text` is non-blank once a task exists; blank input never becomes a task.
//! - `completed` starts as `false`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Creation-timestamp-derived task identifier (epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(TaskId)
    }
}

/// A user-entered to-do item.
///
/// Serialized as `{"id": .., "text": .., "completed": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Stored exactly as entered, surrounding whitespace included.
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Returns whether `text` is acceptable as task input.
pub fn is_valid_task_text(text: &str) -> bool {
    !text.trim().is_empty()
}
