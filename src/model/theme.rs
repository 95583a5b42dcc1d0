//! Theme preference and resolved appearance
//!
//! `ThemePreference` is what the user picked and what gets persisted.
//! `ResolvedAppearance` is what is actually on screen; it is never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The user's display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    #[cfg(test)]
    pub fn all() -> [ThemePreference; 3] {
        [
            ThemePreference::Light,
            ThemePreference::Dark,
            ThemePreference::System,
        ]
    }

    /// Value written to durable storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Parse a stored value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<ThemePreference> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" => Some(ThemePreference::System),
            _ => None,
        }
    }

    /// Next preference for the theme toggle: Light → Dark → System → Light
    pub fn next(&self) -> ThemePreference {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::System,
            ThemePreference::System => ThemePreference::Light,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ThemePreference::Light => "☀",
            ThemePreference::Dark => "☾",
            ThemePreference::System => "◐",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
            ThemePreference::System => "System",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Appearance actually applied to the render root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolvedAppearance {
    Light,
    Dark,
}

impl ResolvedAppearance {
    pub fn from_dark(is_dark: bool) -> ResolvedAppearance {
        if is_dark {
            ResolvedAppearance::Dark
        } else {
            ResolvedAppearance::Light
        }
    }

    /// Marker name placed on the render root
    pub fn marker(&self) -> &'static str {
        match self {
            ResolvedAppearance::Light => "light",
            ResolvedAppearance::Dark => "dark",
        }
    }
}

impl fmt::Display for ResolvedAppearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_stored_values() {
        for pref in ThemePreference::all() {
            assert_eq!(ThemePreference::parse(pref.as_str()), Some(pref));
        }
        assert_eq!(ThemePreference::parse(" Dark\n"), Some(ThemePreference::Dark));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(ThemePreference::parse("sepia"), None);
        assert_eq!(ThemePreference::parse(""), None);
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut pref = ThemePreference::Light;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(pref);
            pref = pref.next();
        }
        assert_eq!(pref, ThemePreference::Light);
        assert_eq!(seen, ThemePreference::all().to_vec());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ThemePreference::System).unwrap();
        assert_eq!(json, "\"system\"");
        let parsed: ThemePreference = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(parsed, ThemePreference::Dark);
    }

    #[test]
    fn test_default_is_system() {
        assert_eq!(ThemePreference::default(), ThemePreference::System);
    }
}
