//! Splash screen component
//!
//! Shows the banner line by line, each line fading in a little after the
//! one above it, before transitioning to the profile selector.

use crate::action::Action;
use crate::component::Component;
use crate::components::palette::{fade, Palette};
use crate::model::reveal::Transition;
use crate::services::compute_start_delay;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const LINE_STAGGER: Duration = Duration::from_millis(70);
const LINE_FADE: Duration = Duration::from_millis(300);

const BANNER: [&str; 6] = [
    "                  _    __       _ _       ",
    " _ __   ___  _ __| |_ / _| ___ | (_) ___  ",
    "| '_ \\ / _ \\| '__| __| |_ / _ \\| | |/ _ \\ ",
    "| |_) | (_) | |  | |_|  _| (_) | | | (_) |",
    "| .__/ \\___/|_|   \\__|_|  \\___/|_|_|\\___/ ",
    "|_|                                       ",
];

/// Splash screen component
pub struct SplashComponent {
    /// When the splash screen was shown
    start_time: Option<Instant>,
    /// Duration to show splash before auto-advancing
    duration: Duration,
    /// Portfolio owner shown under the banner
    owner: String,
}

impl SplashComponent {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            start_time: None,
            duration: Duration::from_millis(1500),
            owner: owner.into(),
        }
    }

    /// Check if splash duration has elapsed
    pub fn is_complete(&self) -> bool {
        self.start_time
            .map(|t| t.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    /// Opacity of banner line `index` at `now`
    fn line_opacity(&self, index: usize, now: Instant) -> f32 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        Transition {
            start: start + compute_start_delay(index, LINE_STAGGER, Duration::ZERO),
            duration: LINE_FADE,
        }
        .progress(now)
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Any key press skips the splash screen
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.is_complete() {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(palette.base()), area);

        let banner_height = BANNER.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height.saturating_sub(banner_height + 4)) / 2),
                Constraint::Length(banner_height),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let now = Instant::now();
        let banner: Vec<Line> = BANNER
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let color = fade(palette.accent, palette.background, self.line_opacity(i, now));
                Line::from(Span::styled(*line, Style::default().fg(color)))
            })
            .collect();
        frame.render_widget(
            Paragraph::new(banner).alignment(Alignment::Center),
            chunks[1],
        );

        // Name and hint appear after the last banner line
        let tail = self.line_opacity(BANNER.len(), now);
        let owner = Line::from(Span::styled(
            self.owner.as_str(),
            Style::default()
                .fg(fade(palette.text, palette.background, tail))
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(
            Paragraph::new(owner).alignment(Alignment::Center),
            chunks[3],
        );

        let hint = Line::from(Span::styled(
            "press any key",
            Style::default().fg(fade(palette.muted, palette.background, tail)),
        ));
        frame.render_widget(
            Paragraph::new(hint).alignment(Alignment::Center),
            chunks[4],
        );

        Ok(())
    }
}
