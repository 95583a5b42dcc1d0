//! Top bar: owner, current page and theme indicator

use crate::components::palette::Palette;
use crate::model::{ResolvedAppearance, Route, ThemePreference};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct Header<'a> {
    pub owner: &'a str,
    pub route: Route,
    pub preference: ThemePreference,
    pub appearance: Option<ResolvedAppearance>,
    pub palette: &'a Palette,
}

impl Header<'_> {
    /// "◐ System (dark)" style indicator
    pub fn theme_indicator(&self) -> String {
        match (self.preference, self.appearance) {
            (ThemePreference::System, Some(appearance)) => {
                format!("{} {} ({})", self.preference.icon(), self.preference.label(), appearance)
            }
            _ => format!("{} {}", self.preference.icon(), self.preference.label()),
        }
    }

    fn page_title(&self) -> &'static str {
        match self.route {
            Route::Selector => "Choose a profile",
            Route::Profile(kind) => kind.label(),
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(palette.border(false))
            .style(palette.base());
        let inner = block.inner(area);
        block.render(area, buf);

        let indicator = self.theme_indicator();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(indicator.chars().count() as u16 + 2),
            ])
            .split(inner);

        let title = Line::from(vec![
            Span::styled(format!(" {} ", self.owner), palette.title()),
            Span::styled("│ ", palette.muted()),
            Span::styled(self.page_title(), Style::default().fg(palette.text)),
            Span::styled(format!("  {}", self.route.path()), palette.muted()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(
            indicator,
            Style::default()
                .fg(palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Right)
        .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProfileKind;

    fn header(preference: ThemePreference, appearance: Option<ResolvedAppearance>) -> String {
        let palette = Palette::dark();
        Header {
            owner: "Alex",
            route: Route::Selector,
            preference,
            appearance,
            palette: &palette,
        }
        .theme_indicator()
    }

    #[test]
    fn test_indicator_shows_resolved_only_for_system() {
        assert!(header(ThemePreference::System, Some(ResolvedAppearance::Dark)).ends_with("(dark)"));
        assert!(!header(ThemePreference::Light, Some(ResolvedAppearance::Light)).contains('('));
    }

    #[test]
    fn test_renders_route_path() {
        let palette = Palette::light();
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 3));
        Header {
            owner: "Alex",
            route: Route::Profile(ProfileKind::Developer),
            preference: ThemePreference::Dark,
            appearance: Some(ResolvedAppearance::Dark),
            palette: &palette,
        }
        .render(Rect::new(0, 0, 80, 3), &mut buf);

        let first_row: String = (0..80)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(first_row.contains("/profile/developer"));
        assert!(first_row.contains("Dark"));
    }
}
