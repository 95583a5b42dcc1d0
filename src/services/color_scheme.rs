//! Environment color-scheme signal
//!
//! Terminals advertise their palette through `COLORFGBG` ("fg;bg" or
//! "fg;default;bg", ANSI color indices). The answer is re-read on every
//! `poll` and subscribers hear about changes only.

use super::signal::{ListenerSet, Subscription};
use regex::Regex;
use std::cell::Cell;
use std::env;
use std::sync::LazyLock;

/// Matches `fg;bg` and `fg;default;bg`, capturing the background index
static COLORFGBG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+|default)\s*;(?:\s*[^;]*\s*;)?\s*(\d+)\s*$").unwrap()
});

/// The environment's dark/light preference
pub trait ColorSchemeSignal {
    /// `Some(true)` for dark, `Some(false)` for light, `None` when unsupported
    fn prefers_dark(&self) -> Option<bool>;

    /// Register for change notifications. The listener receives the new
    /// dark flag and stays registered until the subscription is dropped.
    fn on_color_scheme_change(&self, listener: Box<dyn Fn(&bool)>) -> Subscription;
}

/// Parse a `COLORFGBG` value into a dark flag
pub fn parse_colorfgbg(value: &str) -> Option<bool> {
    let caps = COLORFGBG_REGEX.captures(value)?;
    let background: u8 = caps.get(1)?.as_str().parse().ok()?;
    match background {
        0..=6 | 8 => Some(true),
        7 | 9..=15 => Some(false),
        _ => None,
    }
}

/// Read the terminal's preference from the process environment
pub fn detect_from_env() -> Option<bool> {
    env::var("COLORFGBG")
        .ok()
        .and_then(|value| parse_colorfgbg(&value))
}

/// Polled color-scheme source backed by a detection function
pub struct TerminalColorScheme {
    source: Box<dyn Fn() -> Option<bool>>,
    current: Cell<Option<bool>>,
    listeners: ListenerSet<bool>,
}

impl Default for TerminalColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalColorScheme {
    /// Signal driven by `COLORFGBG`
    pub fn new() -> Self {
        Self::with_source(Box::new(detect_from_env))
    }

    pub fn with_source(source: Box<dyn Fn() -> Option<bool>>) -> Self {
        let current = source();
        Self {
            source,
            current: Cell::new(current),
            listeners: ListenerSet::new(),
        }
    }

    /// Re-read the source and notify subscribers if the answer changed.
    /// Returns whether a change was observed.
    pub fn poll(&self) -> bool {
        let next = (self.source)();
        if next == self.current.get() {
            return false;
        }

        tracing::debug!(previous = ?self.current.get(), next = ?next, "color scheme changed");
        self.current.set(next);
        // Losing support is not a notification; the last answer stays resolved
        if let Some(is_dark) = next {
            self.listeners.emit(&is_dark);
        }
        true
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl ColorSchemeSignal for TerminalColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.current.get()
    }

    fn on_color_scheme_change(&self, listener: Box<dyn Fn(&bool)>) -> Subscription {
        self.listeners.subscribe(listener)
    }
}
