//! Dark-mode preference mirrored to storage and to the document theme.
//!
//! # Invariants
//! - Only the exact stored string `"true"` restores dark mode.
//! - Every change writes `"true"`/`"false"` to the `darkMode` key.
//! - State and theme change only after the write succeeds.

use crate::model::theme::Theme;
use crate::storage::{KeyValueStore, StoreResult};
use crate::view::document::ThemeTarget;
use log::{debug, warn};

/// Storage key holding `"true"` or `"false"`.
pub const DARK_MODE_KEY: &str = "darkMode";

pub struct PreferenceStore<S: KeyValueStore> {
    store: S,
    dark_mode: bool,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Restores the preference, defaulting to light mode.
    ///
    /// # Errors
    /// - Returns storage read failures unchanged.
    pub fn load(store: S) -> StoreResult<Self> {
        let dark_mode = match store.get(DARK_MODE_KEY)?.as_deref() {
            Some("true") => true,
            Some("false") | None => false,
            Some(other) => {
                warn!(
                    "event=preferences_load module=preference_store status=fallback reason=unrecognized_value len={}",
                    other.len()
                );
                false
            }
        };
        Ok(Self { store, dark_mode })
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }

    /// Pushes the current theme to `target` without writing storage.
    pub fn apply(&self, target: &mut impl ThemeTarget) {
        target.apply_theme(self.theme());
    }

    /// Persists dark mode, then adopts it and applies the matching theme.
    pub fn set_dark_mode(&mut self, value: bool, target: &mut impl ThemeTarget) -> StoreResult<()> {
        self.store
            .set(DARK_MODE_KEY, if value { "true" } else { "false" })?;
        self.dark_mode = value;
        self.apply(target);
        debug!("event=dark_mode_set module=preference_store status=ok value={value}");
        Ok(())
    }

    /// Flips dark mode and returns the new value.
    pub fn toggle_dark_mode(&mut self, target: &mut impl ThemeTarget) -> StoreResult<bool> {
        let next = !self.dark_mode;
        self.set_dark_mode(next, target)?;
        Ok(next)
    }
}
