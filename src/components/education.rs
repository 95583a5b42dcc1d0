//! Education timeline entries

use crate::components::palette::Palette;
use crate::model::Education;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// Rows one entry needs: period, degree, institution, highlights, spacer
pub fn entry_height(entry: &Education) -> u16 {
    4 + entry.highlights.len() as u16
}

/// One point on the timeline
pub struct TimelineEntry<'a> {
    pub entry: &'a Education,
    pub palette: &'a Palette,
    /// Last entries do not continue the rule below
    pub is_last: bool,
}

impl Widget for TimelineEntry<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let entry = self.entry;

        let degree = match &entry.field {
            Some(field) => format!("{}, {}", entry.degree, field),
            None => entry.degree.clone(),
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("● ", Style::default().fg(palette.accent)),
                Span::styled(entry.period(), palette.muted()),
            ]),
            Line::from(vec![
                Span::styled("│ ", palette.border(false)),
                Span::styled(
                    degree,
                    Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("│ ", palette.border(false)),
                Span::styled(entry.institution.as_str(), Style::default().fg(palette.accent_alt)),
            ]),
        ];
        for highlight in &entry.highlights {
            lines.push(Line::from(vec![
                Span::styled("│ ", palette.border(false)),
                Span::styled(format!("  · {}", highlight), Style::default().fg(palette.text)),
            ]));
        }
        if !self.is_last {
            lines.push(Line::from(Span::styled("│", palette.border(false))));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
