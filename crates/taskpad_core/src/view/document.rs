//! Document root class list receiving the visual theme.

use crate::model::theme::{Theme, DARK_CLASS};
use std::collections::BTreeSet;

/// Anything that can display a theme.
pub trait ThemeTarget {
    fn apply_theme(&mut self, theme: Theme);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRoot {
    classes: BTreeSet<String>,
}

impl DocumentRoot {
    /// Adds `class` when `enabled`, removes it otherwise.
    pub fn toggle_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

impl ThemeTarget for DocumentRoot {
    fn apply_theme(&mut self, theme: Theme) {
        self.toggle_class(DARK_CLASS, theme.is_dark());
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentRoot, ThemeTarget};
    use crate::model::theme::Theme;

    #[test]
    fn dark_theme_toggles_class_without_touching_others() {
        let mut root = DocumentRoot::default();
        root.toggle_class("app", true);

        root.apply_theme(Theme::Dark);
        assert!(root.has_class("app") && root.has_class("dark"));

        root.apply_theme(Theme::Light);
        assert!(root.has_class("app"));
        assert!(!root.has_class("dark"));
    }
}
