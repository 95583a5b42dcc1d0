//! Services and environment interactions
//!
//! This module contains:
//! - Theme preference control and its storage/signal dependencies
//! - Viewport visibility observation and reveal sequencing
//! - Portfolio content loading

pub mod color_scheme;
pub mod content;
pub mod preference_store;
pub mod reveal;
pub mod signal;
pub mod theme;
pub mod viewport;

pub use color_scheme::{ColorSchemeSignal, TerminalColorScheme};
pub use content::load_or_bundled;
pub use preference_store::{FileStore, MemoryStore, PreferenceStore};
pub use reveal::{compute_start_delay, RevealSequencer};
pub use theme::{RenderRoot, ThemeController};
pub use viewport::ViewportObserver;
