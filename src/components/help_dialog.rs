//! Keyboard shortcut reference

use crate::action::Action;
use crate::component::Component;
use crate::components::{centered_popup, Palette};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};

type Shortcut = (&'static str, &'static str);

const SHORTCUTS: &[(&str, &[Shortcut])] = &[
    (
        "Profiles",
        &[
            ("← / → / Tab", "Move between profile cards"),
            ("Enter", "Open the selected profile"),
            ("Esc / ⌫", "Back to profile selection"),
        ],
    ),
    (
        "Scrolling",
        &[
            ("j / ↓", "Scroll down one line"),
            ("k / ↑", "Scroll up one line"),
            ("PgDn / Space", "Scroll down one page"),
            ("PgUp", "Scroll up one page"),
            ("g / G", "Jump to top / bottom"),
            ("Mouse wheel", "Scroll"),
        ],
    ),
    (
        "Experience",
        &[
            ("Tab", "Select next company"),
            ("Shift+Tab", "Select previous company"),
            ("Enter", "Open company details"),
        ],
    ),
    (
        "Theme",
        &[
            ("t", "Cycle Light → Dark → System"),
            ("1 / 2 / 3", "Light / Dark / System"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Show this help"),
            ("q", "Quit / Close dialog"),
            ("Ctrl+c", "Quit immediately"),
        ],
    ),
];

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl HelpDialog {
    fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                return Ok(Some(Action::CloseModal))
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::PageUp => self.scroll_by(-10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        let dialog_area = centered_popup(area, 60, 30);
        frame.render_widget(Clear, dialog_area);

        let content = help_lines(palette);
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" Keyboard Shortcuts ")
                    .title_style(palette.title())
                    .title_bottom(Line::from(Span::styled(" q/Esc/? close ", palette.muted())))
                    .border_style(Style::default().fg(palette.accent))
                    .style(palette.card()),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, dialog_area);

        if max_scroll > 0 {
            let mut state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }
        Ok(())
    }
}

fn help_lines(palette: &Palette) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(palette.highlight)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(palette.text);

    let mut lines = Vec::new();
    for (title, shortcuts) in SHORTCUTS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", title), heading)));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.chars().count())),
            palette.muted(),
        )));
        for (keys, description) in *shortcuts {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:14}", keys), key_style),
                Span::styled(*description, text),
            ]));
        }
    }
    lines
}
