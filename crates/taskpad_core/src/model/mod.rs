//! Domain model for the task list and the theme preference.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` unique within the list.
//! - Tasks are removed by hard delete; there are no tombstones.

pub mod task;
pub mod theme;
