//! Tech stack grid
//!
//! Skills are laid out in fixed-width cells, as many columns as fit.

use crate::components::palette::Palette;
use crate::model::TechSkill;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub const SKILL_CELL_WIDTH: u16 = 24;
pub const SKILL_CELL_HEIGHT: u16 = 4;
pub const SKILL_GAP: u16 = 2;

/// Number of columns that fit in `width`
pub fn grid_columns(width: u16) -> u16 {
    ((width + SKILL_GAP) / (SKILL_CELL_WIDTH + SKILL_GAP)).max(1)
}

/// Cell rectangles for `count` skills, starting at `origin`
pub fn grid_cells(origin: Rect, count: usize) -> Vec<Rect> {
    let columns = grid_columns(origin.width) as usize;
    let width = SKILL_CELL_WIDTH.min(origin.width);
    (0..count)
        .map(|i| {
            let col = (i % columns) as u16;
            let row = (i / columns) as u16;
            Rect::new(
                origin.x + col * (SKILL_CELL_WIDTH + SKILL_GAP),
                origin.y + row * (SKILL_CELL_HEIGHT + 1),
                width,
                SKILL_CELL_HEIGHT,
            )
        })
        .collect()
}

/// Total rows used by a grid of `count` skills
pub fn grid_height(width: u16, count: usize) -> u16 {
    if count == 0 {
        return 0;
    }
    let columns = grid_columns(width) as usize;
    let rows = count.div_ceil(columns) as u16;
    rows * SKILL_CELL_HEIGHT + rows.saturating_sub(1)
}

/// One skill cell
pub struct SkillCell<'a> {
    pub skill: &'a TechSkill,
    pub palette: &'a Palette,
}

impl Widget for SkillCell<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let lines = vec![
            Line::from(Span::styled(self.skill.name.as_str(), Style::default().fg(palette.text))),
            Line::from(vec![
                Span::styled(self.skill.level_bar(), Style::default().fg(palette.success)),
                Span::styled(format!(" {}", self.skill.category), palette.muted()),
            ]),
        ];
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(palette.border(false))
                    .style(palette.card()),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_fit_width() {
        assert_eq!(grid_columns(10), 1);
        assert_eq!(grid_columns(24), 1);
        assert_eq!(grid_columns(50), 2);
        assert_eq!(grid_columns(78), 3);
    }

    #[test]
    fn test_cells_wrap_rows() {
        let cells = grid_cells(Rect::new(2, 10, 50, 0), 3);
        assert_eq!(cells[0], Rect::new(2, 10, 24, 4));
        assert_eq!(cells[1], Rect::new(28, 10, 24, 4));
        assert_eq!(cells[2], Rect::new(2, 15, 24, 4));
        assert_eq!(grid_height(50, 3), 9);
        assert_eq!(grid_height(50, 0), 0);
    }
}
