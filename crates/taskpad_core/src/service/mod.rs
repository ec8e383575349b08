//! Stateful stores mirrored to persisted key-value storage.
//!
//! # Responsibility
//! - Hold session state in memory and write it back after every mutation.
//! - Keep front-ends decoupled from the storage encoding.

pub mod preference_store;
pub mod task_store;
