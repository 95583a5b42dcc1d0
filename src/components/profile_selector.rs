//! Profile selector - landing page with one card per profile
//!
//! Cards enter staggered as soon as they fit on screen.

use crate::action::Action;
use crate::component::Component;
use crate::components::{reveal_frame::render_revealed, Palette};
use crate::config::RevealSettings;
use crate::model::{
    PortfolioContent, Profile, ProfileKind, RevealGroup, RevealVariant, RevealableElement, Route,
};
use crate::services::{RevealSequencer, ViewportObserver};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use std::time::Instant;

const CARD_WIDTH: u16 = 38;
const CARD_HEIGHT: u16 = 12;
const CARD_GAP: u16 = 4;
const GROUP_KEY: &str = "selector";

fn card_key(kind: ProfileKind) -> String {
    format!("profile-card-{}", kind.slug())
}

/// Card rectangles relative to the selector area
pub fn card_layout(width: u16, height: u16, count: usize) -> Vec<Rect> {
    let count = count as u16;
    if count == 0 {
        return Vec::new();
    }
    let side_by_side = width >= count * CARD_WIDTH + (count - 1) * CARD_GAP;
    if side_by_side {
        let total = count * CARD_WIDTH + (count - 1) * CARD_GAP;
        let x0 = (width - total) / 2;
        let y = height.saturating_sub(CARD_HEIGHT) / 2;
        (0..count)
            .map(|i| Rect::new(x0 + i * (CARD_WIDTH + CARD_GAP), y, CARD_WIDTH, CARD_HEIGHT))
            .collect()
    } else {
        let card_width = CARD_WIDTH.min(width);
        let card_height = CARD_HEIGHT.min(8);
        let total = count * card_height + (count - 1);
        let x = (width - card_width) / 2;
        let y0 = height.saturating_sub(total) / 2;
        (0..count)
            .map(|i| Rect::new(x, y0 + i * (card_height + 1), card_width, card_height))
            .collect()
    }
}

pub struct ProfileSelector {
    profiles: Vec<Profile>,
    selected: usize,
    sequencer: RevealSequencer<ViewportObserver>,
    settings: RevealSettings,
    /// Area size the current bounds were computed for
    laid_out: Option<(u16, u16)>,
    observed: bool,
}

impl ProfileSelector {
    pub fn new(content: &PortfolioContent, settings: RevealSettings) -> Self {
        let profiles: Vec<Profile> = ProfileKind::all()
            .iter()
            .filter_map(|kind| content.profile(*kind).cloned())
            .collect();

        let mut sequencer = RevealSequencer::new(ViewportObserver::new(Rect::default()));
        let mut group = RevealGroup::new(GROUP_KEY, settings.stagger());
        for profile in &profiles {
            group.push(
                RevealableElement::new(card_key(profile.kind), RevealVariant::slide_up(3))
                    .with_duration(settings.duration()),
            );
        }
        sequencer.register_group(group);

        Self {
            profiles,
            selected: 0,
            sequencer,
            settings,
            laid_out: None,
            observed: false,
        }
    }

    pub fn selected_kind(&self) -> Option<ProfileKind> {
        self.profiles.get(self.selected).map(|p| p.kind)
    }

    /// Recompute card bounds for an area; observation starts on the first layout
    fn layout(&mut self, width: u16, height: u16) -> Vec<Rect> {
        let cards = card_layout(width, height, self.profiles.len());
        if self.laid_out != Some((width, height)) {
            let observer = self.sequencer.observer_mut();
            observer.set_viewport(Rect::new(0, 0, width, height));
            for (profile, rect) in self.profiles.iter().zip(&cards) {
                observer.set_bounds(&card_key(profile.kind), *rect);
            }
            self.laid_out = Some((width, height));
        }
        if !self.observed {
            for profile in &self.profiles {
                self.sequencer.observe(
                    &card_key(profile.kind),
                    self.settings.threshold,
                    self.settings.trigger_once,
                );
            }
            self.observed = true;
        }
        cards
    }
}

struct ProfileCard<'a> {
    profile: &'a Profile,
    selected: bool,
    palette: &'a Palette,
}

impl Widget for ProfileCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let profile = self.profile;
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                profile.kind.label(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(profile.title.as_str(), Style::default().fg(palette.text))),
            Line::from(""),
            Line::from(Span::styled(profile.tagline.as_str(), palette.muted())),
        ];
        if let Some(location) = &profile.location {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(location.as_str(), palette.muted())));
        }

        let title = if self.selected { " ▶ Enter to open " } else { "" };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(palette.border(self.selected))
                    .title_bottom(Line::from(Span::styled(title, palette.muted())).centered())
                    .style(palette.card()),
            )
            .render(area, buf);
    }
}

impl Component for ProfileSelector {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                Some(Action::NextItem)
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
                Some(Action::PrevItem)
            }
            KeyCode::Enter => Some(Action::Select),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let count = self.profiles.len();
        match action {
            Action::Tick => {
                self.sequencer.process(Instant::now());
            }
            Action::NextItem if count > 0 => {
                self.selected = (self.selected + 1) % count;
            }
            Action::PrevItem if count > 0 => {
                self.selected = (self.selected + count - 1) % count;
            }
            Action::Select => {
                if let Some(kind) = self.selected_kind() {
                    return Ok(Some(Action::Navigate(Route::Profile(kind))));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        frame.render_widget(Block::default().style(palette.base()), area);

        let cards = self.layout(area.width, area.height);
        let now = Instant::now();
        let buf = frame.buffer_mut();
        for (i, (profile, rect)) in self.profiles.iter().zip(cards).enumerate() {
            let rect = Rect::new(area.x + rect.x, area.y + rect.y, rect.width, rect.height)
                .intersection(area);
            let state = self.sequencer.visual_state(&card_key(profile.kind), now);
            render_revealed(buf, rect, state, palette, |buf, target| {
                ProfileCard {
                    profile,
                    selected: i == self.selected,
                    palette,
                }
                .render(target, buf)
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::content::bundled_content;
    use std::time::Duration;

    fn selector() -> ProfileSelector {
        let content = bundled_content().unwrap();
        ProfileSelector::new(&content, RevealSettings::default())
    }

    #[test]
    fn test_card_layout_side_by_side_when_wide() {
        let cards = card_layout(100, 30, 2);
        assert_eq!(cards[0].y, cards[1].y);
        assert!(cards[0].right() <= cards[1].x);
    }

    #[test]
    fn test_card_layout_stacks_when_narrow() {
        let cards = card_layout(50, 30, 2);
        assert_eq!(cards[0].x, cards[1].x);
        assert!(cards[0].bottom() < cards[1].y);
    }

    #[test]
    fn test_selection_wraps_and_navigates() {
        let mut selector = selector();
        assert_eq!(selector.selected_kind(), Some(ProfileKind::Developer));
        selector.update(Action::PrevItem).unwrap();
        assert_eq!(selector.selected_kind(), Some(ProfileKind::MedicalRepresentative));
        let action = selector.update(Action::Select).unwrap();
        assert_eq!(
            action,
            Some(Action::Navigate(Route::Profile(ProfileKind::MedicalRepresentative)))
        );
    }

    #[test]
    fn test_cards_enter_staggered_once_laid_out() {
        let mut selector = selector();
        selector.layout(100, 30);
        let t = Instant::now();
        selector.sequencer.process(t);

        let first = selector
            .sequencer
            .start_time(&card_key(ProfileKind::Developer))
            .unwrap();
        let second = selector
            .sequencer
            .start_time(&card_key(ProfileKind::MedicalRepresentative))
            .unwrap();
        assert_eq!(second.duration_since(first), Duration::from_millis(120));
    }

    #[test]
    fn test_cards_wait_while_area_too_small() {
        let mut selector = selector();
        selector.layout(0, 0);
        selector.sequencer.process(Instant::now());
        assert!(!selector.sequencer.is_triggered(&card_key(ProfileKind::Developer)));

        selector.layout(100, 30);
        selector.sequencer.process(Instant::now());
        assert!(selector.sequencer.is_triggered(&card_key(ProfileKind::Developer)));
    }
}
