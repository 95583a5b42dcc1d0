//! Company cards and the company detail dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::profile_page::wrapped_height;
use crate::components::{centered_popup, Palette};
use crate::model::Company;
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Widget, Wrap,
    },
    Frame,
};

pub const COMPANY_CARD_HEIGHT: u16 = 6;

/// Summary card on the profile page
pub struct CompanyCard<'a> {
    pub company: &'a Company,
    pub today: NaiveDate,
    pub selected: bool,
    pub palette: &'a Palette,
}

impl Widget for CompanyCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let company = self.company;

        let mut heading = vec![
            Span::styled(
                company.role.as_str(),
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" @ ", palette.muted()),
            Span::styled(company.name.as_str(), Style::default().fg(palette.accent)),
        ];
        if company.is_current() {
            heading.push(Span::styled("  ● current", Style::default().fg(palette.success)));
        }

        let mut meta = vec![
            Span::styled(company.period(), palette.muted()),
            Span::styled(
                format!("  ({})", company.formatted_tenure(self.today)),
                Style::default().fg(palette.accent_alt),
            ),
        ];
        if let Some(location) = &company.location {
            meta.push(Span::styled(format!("  {}", location), palette.muted()));
        }

        let lines = vec![
            Line::from(heading),
            Line::from(meta),
            Line::from(Span::styled(
                company.summary.as_str(),
                Style::default().fg(palette.text),
            )),
        ];

        let hint = if self.selected { " Enter: details " } else { "" };
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(palette.border(self.selected))
                    .title_bottom(Line::from(Span::styled(hint, palette.muted())))
                    .style(palette.card()),
            )
            .render(area, buf);
    }
}

/// Modal with a company's achievements and technologies
pub struct CompanyDialog {
    company: Company,
    today: NaiveDate,
    scroll: u16,
}

impl CompanyDialog {
    pub fn new(company: Company, today: NaiveDate) -> Self {
        Self {
            company,
            today,
            scroll: 0,
        }
    }

    fn lines(&self, palette: &Palette) -> Vec<Line<'_>> {
        let company = &self.company;
        let section = |title: &'static str| {
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let mut lines = vec![
            Line::from(Span::styled(
                company.role.as_str(),
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(company.period(), palette.muted()),
                Span::styled(
                    format!("  {}", company.formatted_tenure(self.today)),
                    Style::default().fg(palette.accent_alt),
                ),
            ]),
        ];
        if let Some(location) = &company.location {
            lines.push(Line::from(Span::styled(location.as_str(), palette.muted())));
        }
        lines.push(Line::from(""));
        if !company.summary.is_empty() {
            lines.push(Line::from(Span::styled(
                company.summary.as_str(),
                Style::default().fg(palette.text),
            )));
            lines.push(Line::from(""));
        }
        if !company.achievements.is_empty() {
            lines.push(section("Achievements"));
            for achievement in &company.achievements {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(palette.accent)),
                    Span::styled(achievement.as_str(), Style::default().fg(palette.text)),
                ]));
            }
            lines.push(Line::from(""));
        }
        if !company.technologies.is_empty() {
            lines.push(section("Technologies"));
            lines.push(Line::from(Span::styled(
                format!("  {}", company.technologies.join(" · ")),
                Style::default().fg(palette.success),
            )));
        }
        lines
    }
}

impl Component for CompanyDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Ok(Some(Action::CloseModal)),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        let popup_area = centered_popup(area, 72, 22);
        frame.render_widget(Clear, popup_area);

        let inner_width = popup_area.width.saturating_sub(2);
        let inner_height = popup_area.height.saturating_sub(2);
        let max_scroll =
            content_rows(&self.lines(palette), inner_width).saturating_sub(inner_height);
        self.scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(self.lines(palette))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.accent))
                    .title(format!(" {} ", self.company.name))
                    .title_style(palette.title())
                    .title_bottom(Line::from(Span::styled(" j/k scroll · Esc close ", palette.muted())))
                    .style(palette.card()),
            );
        frame.render_widget(paragraph, popup_area);

        if max_scroll > 0 {
            let mut state = ScrollbarState::new(max_scroll as usize).position(self.scroll as usize);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                popup_area,
                &mut state,
            );
        }
        Ok(())
    }
}

/// Rows `lines` take once wrapped to `width`, never fewer than ratatui renders
fn content_rows(lines: &[Line], width: u16) -> u16 {
    lines
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            let indent = text.len() - text.trim_start().len();
            let rows = wrapped_height(text.trim_start(), width.saturating_sub(indent as u16));
            rows.max(1)
        })
        .fold(0u16, |total, rows| total.saturating_add(rows))
}
