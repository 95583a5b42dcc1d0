//! Colors per resolved appearance
//!
//! The render root's marker selects the palette. Partially revealed
//! elements blend their foreground toward the background.

use crate::model::ResolvedAppearance;
use crate::services::RenderRoot;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub appearance: ResolvedAppearance,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub highlight: Color,
    pub success: Color,
    pub danger: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            appearance: ResolvedAppearance::Dark,
            background: Color::Rgb(15, 17, 26),
            surface: Color::Rgb(27, 31, 46),
            text: Color::Rgb(226, 232, 240),
            muted: Color::Rgb(120, 131, 153),
            accent: Color::Rgb(99, 179, 237),
            accent_alt: Color::Rgb(183, 148, 244),
            border: Color::Rgb(55, 65, 90),
            highlight: Color::Rgb(246, 173, 85),
            success: Color::Rgb(104, 211, 145),
            danger: Color::Rgb(252, 129, 129),
        }
    }

    pub fn light() -> Self {
        Self {
            appearance: ResolvedAppearance::Light,
            background: Color::Rgb(248, 250, 252),
            surface: Color::Rgb(237, 242, 247),
            text: Color::Rgb(26, 32, 44),
            muted: Color::Rgb(113, 128, 150),
            accent: Color::Rgb(43, 108, 176),
            accent_alt: Color::Rgb(107, 70, 193),
            border: Color::Rgb(203, 213, 224),
            highlight: Color::Rgb(221, 107, 32),
            success: Color::Rgb(47, 133, 90),
            danger: Color::Rgb(197, 48, 48),
        }
    }

    pub fn for_appearance(appearance: ResolvedAppearance) -> Self {
        match appearance {
            ResolvedAppearance::Dark => Self::dark(),
            ResolvedAppearance::Light => Self::light(),
        }
    }

    /// Palette for whatever marker the root carries; dark before any is applied
    pub fn from_root(root: &RenderRoot) -> Self {
        Self::for_appearance(root.appearance().unwrap_or(ResolvedAppearance::Dark))
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn card(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.highlight)
        } else {
            Style::default().fg(self.border)
        }
    }
}

/// Mix `color` toward `background` by `1.0 - opacity`
pub fn fade(color: Color, background: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let mix = |c: u8, base: u8| -> u8 {
                (base as f32 + (c as f32 - base as f32) * opacity).round() as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        // Indexed colors cannot blend; switch over at the halfway point
        _ if opacity >= 0.5 => color,
        _ => background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(fade(fg, bg, 1.0), fg);
        assert_eq!(fade(fg, bg, 0.0), bg);
        assert_eq!(fade(fg, bg, 0.5), Color::Rgb(100, 50, 0));
    }

    #[test]
    fn test_fade_indexed_colors_switch() {
        assert_eq!(fade(Color::Red, Color::Black, 0.6), Color::Red);
        assert_eq!(fade(Color::Red, Color::Black, 0.4), Color::Black);
    }

    #[test]
    fn test_palette_follows_root_marker() {
        let root = RenderRoot::new();
        assert_eq!(Palette::from_root(&root), Palette::dark());
        assert_eq!(
            Palette::for_appearance(ResolvedAppearance::Light).appearance,
            ResolvedAppearance::Light
        );
    }
}
