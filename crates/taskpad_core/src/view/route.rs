//! The two navigable views.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`: task list.
    #[default]
    Home,
    /// `/settings`: preference toggle.
    Settings,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Home, Route::Settings];

    /// Parses a path; a single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => trimmed,
        };
        match normalized {
            "/" | "" => Some(Self::Home),
            "/settings" => Some(Self::Settings),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Settings => "/settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Settings => "Settings",
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
