//! Model layer - state types
//!
//! This module contains the state-related types:
//! - `theme` - Theme preference and resolved appearance
//! - `reveal` - Entrance animation descriptors
//! - `content` - Portfolio content
//! - `ui` / `modal` - Navigation and overlay state

pub mod content;
pub mod modal;
pub mod reveal;
pub mod theme;
pub mod ui;

// Re-export commonly used types
pub use content::{Company, Education, PortfolioContent, Profile, ProfileKind, TechSkill};
pub use reveal::{RevealGroup, RevealVariant, RevealableElement, VisualState};
pub use theme::{ResolvedAppearance, ThemePreference};
pub use ui::{AppMode, Route};
