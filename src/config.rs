use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Entrance animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    /// Fraction of an element that must be on screen before it animates in
    pub threshold: f32,
    /// Delay between siblings in a group
    pub stagger_ms: u64,
    /// Length of one entrance transition
    pub duration_ms: u64,
    /// Animate each element only the first time it scrolls into view
    pub trigger_once: bool,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: 0.25,
            stagger_ms: 120,
            duration_ms: 450,
            trigger_once: true,
        }
    }
}

impl RevealSettings {
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON or YAML content file; the bundled content is used when unset
    pub content_path: Option<String>,
    pub tick_rate_ms: u64,
    pub reveal: RevealSettings,
    /// Default log filter when `PORTFOLIO_LOG` is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_path: None,
            tick_rate_ms: 50,
            reveal: RevealSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".portfolio-tui"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// `Ok(None)` when the file does not exist; unreadable or malformed files are errors
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Config for startup, plus a warning to log once logging is up
    ///
    /// A missing file is created with the defaults so they can be edited.
    /// A broken file is left untouched and the defaults are used in memory.
    pub fn load_or_create_at(path: &Path) -> (Config, Option<String>) {
        match Self::load_from(path) {
            Ok(Some(config)) => (config, None),
            Ok(None) => {
                let config = Config::default();
                let warning = config
                    .save_to(path)
                    .err()
                    .map(|e| format!("Could not write default config: {:#}", e));
                (config, warning)
            }
            Err(e) => (
                Config::default(),
                Some(format!("Using default config: {:#}", e)),
            ),
        }
    }

    /// Write the config as pretty JSON, creating the directory
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn content_path(&self) -> Option<PathBuf> {
        self.content_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }
}
