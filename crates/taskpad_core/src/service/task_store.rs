//! Ordered task list with add/toggle/delete.
//!
//! # Responsibility
//! - Own the in-memory task list for the session.
//! - Serialize the whole list to the `tasks` key after every mutation.
//!
//! # Invariants
//! - List order is insertion order, and it survives a reload.
//! - Ids are unique. They increase in creation order until the largest
//!   representable id is taken; after that the lowest free id is reused.
//! - Blank input and unknown ids are no-ops that never touch storage.
//! - A failed write leaves the in-memory list as it was before the call.
//! - Malformed persisted state loads as an empty list.

use crate::model::task::{is_valid_task_text, Task, TaskId};
use crate::storage::{KeyValueStore, StoreError, StoreResult};
use log::{debug, warn};
use std::collections::HashSet;

/// Storage key holding the JSON-encoded task array.
pub const TASKS_KEY: &str = "tasks";

pub struct TaskStore<S: KeyValueStore> {
    store: S,
    tasks: Vec<Task>,
    last_id: Option<i64>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Restores the task list from `store`.
    ///
    /// An absent key, unparsable JSON, or a non-array value all yield an
    /// empty list. Tasks repeating an earlier id are dropped.
    ///
    /// # Errors
    /// - Returns storage read failures unchanged.
    pub fn load(store: S) -> StoreResult<Self> {
        let tasks = match store.get(TASKS_KEY)? {
            Some(raw) => decode_tasks(&raw),
            None => Vec::new(),
        };
        let last_id = tasks.iter().map(|task| task.id.0).max();
        debug!(
            "event=tasks_load module=task_store status=ok task_count={}",
            tasks.len()
        );
        Ok(Self {
            store,
            tasks,
            last_id,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet completed.
    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    /// Appends a task built from `text`, using `now_ms` to derive its id.
    ///
    /// Returns `Ok(None)` without persisting when `text` is blank.
    pub fn add_task(&mut self, text: &str, now_ms: i64) -> StoreResult<Option<Task>> {
        if !is_valid_task_text(text) {
            debug!("event=task_add module=task_store status=skipped reason=blank_text");
            return Ok(None);
        }

        let task = Task::new(self.allocate_id(now_ms), text);
        self.tasks.push(task.clone());
        self.persist_or_undo("task_add", |tasks| {
            tasks.pop();
        })?;
        self.last_id = self.last_id.max(Some(task.id.0));
        debug!(
            "event=task_add module=task_store status=ok task_id={} task_count={}",
            task.id,
            self.tasks.len()
        );
        Ok(Some(task))
    }

    /// Flips `completed` for `id` and returns the new value.
    ///
    /// Returns `Ok(None)` without persisting when `id` is unknown.
    pub fn toggle_task(&mut self, id: TaskId) -> StoreResult<Option<bool>> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=task_toggle module=task_store status=skipped reason=not_found task_id={id}");
            return Ok(None);
        };

        self.tasks[index].toggle();
        let completed = self.tasks[index].completed;
        self.persist_or_undo("task_toggle", |tasks| tasks[index].toggle())?;
        debug!(
            "event=task_toggle module=task_store status=ok task_id={id} completed={completed}"
        );
        Ok(Some(completed))
    }

    /// Removes `id` and returns the removed task.
    ///
    /// Returns `Ok(None)` without persisting when `id` is unknown.
    pub fn delete_task(&mut self, id: TaskId) -> StoreResult<Option<Task>> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=task_delete module=task_store status=skipped reason=not_found task_id={id}");
            return Ok(None);
        };

        let removed = self.tasks.remove(index);
        let restore = removed.clone();
        self.persist_or_undo("task_delete", move |tasks| tasks.insert(index, restore))?;
        debug!(
            "event=task_delete module=task_store status=ok task_id={id} task_count={}",
            self.tasks.len()
        );
        Ok(Some(removed))
    }

    /// Picks the id for a new task without reserving it.
    fn allocate_id(&self, now_ms: i64) -> TaskId {
        let next = match self.last_id {
            Some(last) if now_ms <= last => last.checked_add(1),
            _ => Some(now_ms),
        };
        TaskId(next.unwrap_or_else(|| self.lowest_free_id()))
    }

    fn lowest_free_id(&self) -> i64 {
        let used = self
            .tasks
            .iter()
            .map(|task| task.id.0)
            .collect::<HashSet<_>>();
        (0..=i64::MAX)
            .find(|id| !used.contains(id))
            .unwrap_or(i64::MIN)
    }

    /// Writes the list; on failure runs `undo` so memory matches storage.
    fn persist_or_undo(
        &mut self,
        operation: &'static str,
        undo: impl FnOnce(&mut Vec<Task>),
    ) -> StoreResult<()> {
        let result = serde_json::to_string(&self.tasks)
            .map_err(StoreError::from)
            .and_then(|encoded| self.store.set(TASKS_KEY, &encoded));
        if let Err(err) = &result {
            warn!("event={operation} module=task_store status=rolled_back error={err}");
            undo(&mut self.tasks);
        }
        result
    }
}

fn decode_tasks(raw: &str) -> Vec<Task> {
    let tasks = match serde_json::from_str::<Vec<Task>>(raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!(
                "event=tasks_load module=task_store status=fallback reason=malformed error={}",
                err
            );
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(tasks.len());
    let before = tasks.len();
    let unique = tasks
        .into_iter()
        .filter(|task| seen.insert(task.id))
        .collect::<Vec<_>>();
    if unique.len() != before {
        warn!(
            "event=tasks_load module=task_store status=fallback reason=duplicate_ids dropped={}",
            before - unique.len()
        );
    }
    unique
}
