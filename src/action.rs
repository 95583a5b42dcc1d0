//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::{Route, ThemePreference};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations/updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Transition from splash to main app
    SplashComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next item (profile card, company)
    NextItem,
    /// Move to previous item
    PrevItem,
    /// Activate the current item
    Select,
    /// Go to a route
    Navigate(Route),
    /// Go to the parent route
    Back,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll page up one line
    ScrollUp,
    /// Scroll page down one line
    ScrollDown,
    /// Scroll page up one screen
    PageUp,
    /// Scroll page down one screen
    PageDown,
    /// Jump to the top of the page
    ScrollTop,
    /// Jump to the bottom of the page
    ScrollBottom,

    // ─────────────────────────────────────────────────────────────────────────
    // Theme
    // ─────────────────────────────────────────────────────────────────────────
    /// Advance Light → Dark → System
    CycleTheme,
    /// Set an explicit preference
    SetTheme(ThemePreference),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the selected company's details
    OpenCompany(usize),
    /// Close the current modal
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::Select => write!(f, "Select"),
            Action::Navigate(route) => write!(f, "Navigate({})", route),
            Action::Back => write!(f, "Back"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::ScrollTop => write!(f, "ScrollTop"),
            Action::ScrollBottom => write!(f, "ScrollBottom"),
            Action::CycleTheme => write!(f, "CycleTheme"),
            Action::SetTheme(pref) => write!(f, "SetTheme({})", pref),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenCompany(index) => write!(f, "OpenCompany({})", index),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
