//! Environment-driven runtime configuration.
//!
//! Blank variables count as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TASKPAD_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TASKPAD_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TASKPAD_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "taskpad.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "taskpad-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskpadConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl TaskpadConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, falling back to defaults
    /// under the system temp directory.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskpadConfig, DB_PATH_ENV, LOG_LEVEL_ENV};
    use std::path::PathBuf;

    #[test]
    fn defaults_live_under_temp_dir() {
        let config = TaskpadConfig::from_lookup(|_| None);
        assert_eq!(config.db_path, std::env::temp_dir().join("taskpad.sqlite3"));
        assert_eq!(config.log_dir, std::env::temp_dir().join("taskpad-logs"));
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn explicit_values_are_trimmed_and_blank_is_unset() {
        let config = TaskpadConfig::from_lookup(|name| match name {
            DB_PATH_ENV => Some("  /data/tasks.db ".to_string()),
            LOG_LEVEL_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/data/tasks.db"));
        assert_eq!(config.log_level, crate::logging::default_log_level());
    }
}
