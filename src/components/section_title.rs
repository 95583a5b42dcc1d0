//! Section heading with an underline rule

use crate::components::palette::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Rows a section title occupies
pub const SECTION_TITLE_HEIGHT: u16 = 2;

pub struct SectionTitle<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub palette: &'a Palette,
}

impl Widget for SectionTitle<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(self.title.to_uppercase(), self.palette.title())];
        if let Some(subtitle) = self.subtitle {
            spans.push(Span::styled(format!("  {}", subtitle), self.palette.muted()));
        }
        let rule = "─".repeat(area.width as usize);
        Paragraph::new(vec![
            Line::from(spans),
            Line::from(Span::styled(rule, self.palette.border(false))),
        ])
        .render(area, buf);
    }
}
