//! UI state - navigation and application mode

use super::content::ProfileKind;
use std::fmt;

/// Main application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Splash,
    Running,
}

/// Page currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Profile selection landing page
    Selector,
    /// Detail page for one profile
    Profile(ProfileKind),
}

impl Route {
    /// Path-style name, e.g. `/profile/developer`
    pub fn path(&self) -> String {
        match self {
            Route::Selector => "/".to_string(),
            Route::Profile(kind) => format!("/profile/{}", kind.slug()),
        }
    }

    /// Where `Back` leads
    pub fn parent(&self) -> Option<Route> {
        match self {
            Route::Selector => None,
            Route::Profile(_) => Some(Route::Selector),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
