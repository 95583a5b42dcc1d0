//! Profile page - scrollable sections that animate in as they scroll into view
//!
//! Blocks are laid out on a tall canvas in content coordinates. The
//! sequencer's observer watches a viewport window over that canvas, and the
//! visible rows are copied to the frame after each block is painted with its
//! current visual state.

use crate::action::Action;
use crate::component::Component;
use crate::components::companies::{CompanyCard, COMPANY_CARD_HEIGHT};
use crate::components::education::{entry_height, TimelineEntry};
use crate::components::reveal_frame::{blit, render_revealed};
use crate::components::section_title::{SectionTitle, SECTION_TITLE_HEIGHT};
use crate::components::tech_stack::{grid_cells, grid_height, SkillCell};
use crate::components::Palette;
use crate::config::RevealSettings;
use crate::model::{
    Company, Education, PortfolioContent, Profile, ProfileKind, RevealGroup, RevealVariant,
    RevealableElement, TechSkill,
};
use crate::services::{RevealSequencer, ViewportObserver};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Widget, Wrap},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

const MARGIN_X: u16 = 2;
const SECTION_GAP: u16 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Skills,
    Experience,
    Education,
}

impl Section {
    fn title(&self) -> &'static str {
        match self {
            Section::Skills => "Tech stack",
            Section::Experience => "Experience",
            Section::Education => "Education",
        }
    }

    fn group_key(&self) -> &'static str {
        match self {
            Section::Skills => "skills",
            Section::Experience => "companies",
            Section::Education => "education",
        }
    }

    fn variant(&self) -> RevealVariant {
        match self {
            Section::Skills => RevealVariant::slide_up(2),
            Section::Experience => RevealVariant::slide_from_right(6),
            Section::Education => RevealVariant::slide_from_left(4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Hero,
    Title(Section),
    Skill(usize),
    Company(usize),
    Education(usize),
}

impl BlockKind {
    /// Stable key used for reveal tracking
    pub fn key(&self) -> String {
        match self {
            BlockKind::Hero => "hero".to_string(),
            BlockKind::Title(section) => format!("title-{}", section.group_key()),
            BlockKind::Skill(i) => format!("skill-{i}"),
            BlockKind::Company(i) => format!("company-{i}"),
            BlockKind::Education(i) => format!("education-{i}"),
        }
    }

    /// Group the block staggers within; headings enter on their own
    fn section(&self) -> Option<Section> {
        match self {
            BlockKind::Skill(_) => Some(Section::Skills),
            BlockKind::Company(_) => Some(Section::Experience),
            BlockKind::Education(_) => Some(Section::Education),
            BlockKind::Hero | BlockKind::Title(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBlock {
    pub kind: BlockKind,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub blocks: Vec<PageBlock>,
    /// Total canvas height
    pub height: u16,
}

impl PageLayout {
    pub fn bounds(&self, kind: BlockKind) -> Option<Rect> {
        self.blocks.iter().find(|b| b.kind == kind).map(|b| b.bounds)
    }
}

/// Rows `text` needs when word-wrapped to `width` columns
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }
    let width = width.max(1) as usize;
    let mut lines = 1usize;
    let mut current = 0usize;
    for word in text.split_whitespace() {
        let word_width = word.width();
        if current == 0 {
            current = word_width;
        } else if current + 1 + word_width <= width {
            current += 1 + word_width;
        } else {
            lines += 1;
            current = word_width;
        }
        // Words wider than a line spill over
        while current > width {
            lines += 1;
            current -= width;
        }
    }
    lines as u16
}

fn hero_height(profile: Option<&Profile>, width: u16) -> u16 {
    match profile {
        // name, title, tagline, location, blank, summary
        Some(profile) => 5 + wrapped_height(&profile.summary, width).max(1),
        None => 2,
    }
}

/// Place every block of a profile page for a canvas `width` columns wide
pub fn build_layout(
    width: u16,
    profile: Option<&Profile>,
    skills: usize,
    companies: usize,
    education: &[Education],
) -> PageLayout {
    let inner_width = width.saturating_sub(MARGIN_X * 2).max(1);
    let mut blocks = Vec::new();
    let mut y = 1u16;

    let hero = hero_height(profile, inner_width);
    blocks.push(PageBlock {
        kind: BlockKind::Hero,
        bounds: Rect::new(MARGIN_X, y, inner_width, hero),
    });
    y += hero + SECTION_GAP;

    let title = |blocks: &mut Vec<PageBlock>, y: &mut u16, section: Section| {
        blocks.push(PageBlock {
            kind: BlockKind::Title(section),
            bounds: Rect::new(MARGIN_X, *y, inner_width, SECTION_TITLE_HEIGHT),
        });
        *y += SECTION_TITLE_HEIGHT + 1;
    };

    if skills > 0 {
        title(&mut blocks, &mut y, Section::Skills);
        let origin = Rect::new(MARGIN_X, y, inner_width, 0);
        for (i, cell) in grid_cells(origin, skills).into_iter().enumerate() {
            blocks.push(PageBlock {
                kind: BlockKind::Skill(i),
                bounds: cell,
            });
        }
        y += grid_height(inner_width, skills) + SECTION_GAP;
    }

    if companies > 0 {
        title(&mut blocks, &mut y, Section::Experience);
        for i in 0..companies {
            blocks.push(PageBlock {
                kind: BlockKind::Company(i),
                bounds: Rect::new(MARGIN_X, y, inner_width, COMPANY_CARD_HEIGHT),
            });
            y += COMPANY_CARD_HEIGHT + 1;
        }
        y += SECTION_GAP - 1;
    }

    if !education.is_empty() {
        title(&mut blocks, &mut y, Section::Education);
        for (i, entry) in education.iter().enumerate() {
            let height = entry_height(entry);
            blocks.push(PageBlock {
                kind: BlockKind::Education(i),
                bounds: Rect::new(MARGIN_X, y, inner_width, height),
            });
            y += height;
        }
    }

    PageLayout {
        blocks,
        height: y + 1,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Component
// ─────────────────────────────────────────────────────────────────────────────

pub struct ProfilePage {
    kind: ProfileKind,
    profile: Option<Profile>,
    companies: Vec<Company>,
    education: Vec<Education>,
    skills: Vec<TechSkill>,
    settings: RevealSettings,
    sequencer: RevealSequencer<ViewportObserver>,
    layout: Option<PageLayout>,
    viewport: Rect,
    scroll: u16,
    selected_company: Option<usize>,
    today: NaiveDate,
}

impl ProfilePage {
    pub fn new(
        kind: ProfileKind,
        content: &PortfolioContent,
        settings: RevealSettings,
        today: NaiveDate,
    ) -> Self {
        Self {
            kind,
            profile: content.profile(kind).cloned(),
            companies: content.companies_for(kind).into_iter().cloned().collect(),
            education: content.education_for(kind).into_iter().cloned().collect(),
            skills: content.tech_stack_for(kind).to_vec(),
            settings,
            sequencer: RevealSequencer::new(ViewportObserver::new(Rect::default())),
            layout: None,
            viewport: Rect::default(),
            scroll: 0,
            selected_company: None,
            today,
        }
    }

    pub fn company(&self, index: usize) -> Option<&Company> {
        self.companies.get(index)
    }

    pub fn selected_company(&self) -> Option<usize> {
        self.selected_company
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self) -> u16 {
        self.layout
            .as_ref()
            .map(|l| l.height.saturating_sub(self.viewport.height))
            .unwrap_or(0)
    }

    /// Lay the page out for a `width` x `height` window. The first layout
    /// registers every block and starts observing it.
    fn ensure_layout(&mut self, width: u16, height: u16) {
        if width == 0 || height == 0 {
            return;
        }
        let width_changed = self.layout.is_none() || self.viewport.width != width;
        self.viewport = Rect::new(0, self.scroll, width, height);

        if width_changed {
            let layout = build_layout(
                width,
                self.profile.as_ref(),
                self.skills.len(),
                self.companies.len(),
                &self.education,
            );
            let first = self.layout.is_none();
            if first {
                self.register(&layout);
            }

            let observer = self.sequencer.observer_mut();
            observer.set_viewport(self.viewport);
            for block in &layout.blocks {
                observer.set_bounds(&block.kind.key(), block.bounds);
            }

            if first {
                for block in &layout.blocks {
                    self.sequencer.observe(
                        &block.kind.key(),
                        self.settings.threshold,
                        self.settings.trigger_once,
                    );
                }
            }
            self.layout = Some(layout);
        }

        // A taller window may leave the old offset past the end
        self.scroll_to(self.scroll);
    }

    fn register(&mut self, layout: &PageLayout) {
        let duration = self.settings.duration();
        let mut groups: Vec<RevealGroup> = Vec::new();

        for block in &layout.blocks {
            let key = block.kind.key();
            match block.kind.section() {
                Some(section) => {
                    let element =
                        RevealableElement::new(key, section.variant()).with_duration(duration);
                    match groups.iter_mut().find(|g| g.key == section.group_key()) {
                        Some(group) => group.push(element),
                        None => {
                            let mut group =
                                RevealGroup::new(section.group_key(), self.settings.stagger());
                            group.push(element);
                            groups.push(group);
                        }
                    }
                }
                None => {
                    let variant = match block.kind {
                        BlockKind::Hero => RevealVariant::fade_in(),
                        _ => RevealVariant::slide_from_left(4),
                    };
                    self.sequencer
                        .register(RevealableElement::new(key, variant).with_duration(duration));
                }
            }
        }

        for group in groups {
            self.sequencer.register_group(group);
        }
    }

    fn scroll_to(&mut self, offset: u16) {
        self.scroll = offset.min(self.max_scroll());
        if self.viewport.height > 0 {
            self.viewport.y = self.scroll;
            self.sequencer.observer_mut().set_viewport(self.viewport);
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let target = (self.scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        self.scroll_to(target);
    }

    /// Scroll just enough to bring `bounds` fully on screen
    fn scroll_into_view(&mut self, bounds: Rect) {
        let height = self.viewport.height;
        if bounds.y < self.scroll {
            self.scroll_to(bounds.y.saturating_sub(1));
        } else if bounds.bottom() > self.scroll + height {
            self.scroll_to((bounds.bottom() + 1).saturating_sub(height));
        }
    }

    fn select_company(&mut self, forward: bool) {
        let count = self.companies.len();
        if count == 0 {
            return;
        }
        let next = match (self.selected_company, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.selected_company = Some(next);

        let bounds = self
            .layout
            .as_ref()
            .and_then(|l| l.bounds(BlockKind::Company(next)));
        if let Some(bounds) = bounds {
            self.scroll_into_view(bounds);
        }
    }

    fn render_hero(&self, buf: &mut Buffer, area: Rect, palette: &Palette) {
        let Some(profile) = &self.profile else {
            let message = format!("No {} profile in this portfolio", self.kind.label());
            Paragraph::new(Span::styled(message, palette.muted())).render(area, buf);
            return;
        };
        let mut lines = vec![
            Line::from(Span::styled(
                profile.name.as_str(),
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(profile.title.as_str(), palette.title())),
            Line::from(Span::styled(
                profile.tagline.as_str(),
                Style::default().fg(palette.accent_alt),
            )),
            Line::from(Span::styled(
                profile.location.as_deref().unwrap_or(""),
                palette.muted(),
            )),
            Line::from(""),
        ];
        lines.push(Line::from(Span::styled(
            profile.summary.as_str(),
            Style::default().fg(palette.text),
        )));
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_block(&self, kind: BlockKind, buf: &mut Buffer, area: Rect, palette: &Palette) {
        match kind {
            BlockKind::Hero => self.render_hero(buf, area, palette),
            BlockKind::Title(section) => {
                let subtitle = match section {
                    Section::Skills => format!("{} tools", self.skills.len()),
                    Section::Experience => format!("{} roles", self.companies.len()),
                    Section::Education => format!("{} entries", self.education.len()),
                };
                SectionTitle {
                    title: section.title(),
                    subtitle: Some(&subtitle),
                    palette,
                }
                .render(area, buf);
            }
            BlockKind::Skill(i) => {
                if let Some(skill) = self.skills.get(i) {
                    SkillCell { skill, palette }.render(area, buf);
                }
            }
            BlockKind::Company(i) => {
                if let Some(company) = self.companies.get(i) {
                    CompanyCard {
                        company,
                        today: self.today,
                        selected: self.selected_company == Some(i),
                        palette,
                    }
                    .render(area, buf);
                }
            }
            BlockKind::Education(i) => {
                if let Some(entry) = self.education.get(i) {
                    TimelineEntry {
                        entry,
                        palette,
                        is_last: i + 1 == self.education.len(),
                    }
                    .render(area, buf);
                }
            }
        }
    }
}

impl Component for ProfilePage {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollTop),
            KeyCode::Char('G') | KeyCode::End => Some(Action::ScrollBottom),
            KeyCode::Tab => Some(Action::NextItem),
            KeyCode::BackTab => Some(Action::PrevItem),
            KeyCode::Enter => Some(Action::Select),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
                Some(Action::Back)
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let page = self.viewport.height.saturating_sub(2).max(1) as i32;
        match action {
            Action::Tick => {
                self.sequencer.process(Instant::now());
            }
            Action::ScrollDown => self.scroll_by(1),
            Action::ScrollUp => self.scroll_by(-1),
            Action::PageDown => self.scroll_by(page),
            Action::PageUp => self.scroll_by(-page),
            Action::ScrollTop => self.scroll_to(0),
            Action::ScrollBottom => self.scroll_to(u16::MAX),
            Action::NextItem => self.select_company(true),
            Action::PrevItem => self.select_company(false),
            Action::Select => {
                if let Some(index) = self.selected_company {
                    return Ok(Some(Action::OpenCompany(index)));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        frame.render_widget(Block::default().style(palette.base()), area);
        self.ensure_layout(area.width, area.height);

        let Some(layout) = &self.layout else {
            return Ok(());
        };

        let mut canvas = Buffer::empty(Rect::new(0, 0, area.width, layout.height.max(1)));
        canvas.set_style(canvas.area, palette.base());

        let now = Instant::now();
        for block in &layout.blocks {
            let state = self.sequencer.visual_state(&block.kind.key(), now);
            render_revealed(&mut canvas, block.bounds, state, palette, |buf, target| {
                self.render_block(block.kind, buf, target, palette)
            });
        }

        blit(&canvas, self.scroll, frame.buffer_mut(), area);

        let max_scroll = self.max_scroll();
        if max_scroll > 0 {
            let mut state = ScrollbarState::new(max_scroll as usize).position(self.scroll as usize);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .style(Style::default().fg(palette.border)),
                area,
                &mut state,
            );
        }
        Ok(())
    }
}
