//! Painting partially revealed elements
//!
//! A block is rendered at its offset position, clipped to the buffer, then
//! its foreground is faded toward the background by the element's opacity.

use super::layout::offset_within;
use super::palette::{fade, Palette};
use crate::model::VisualState;
use ratatui::{buffer::Buffer, layout::Rect};

/// Render `draw` into `rect` as seen through `state`
pub fn render_revealed<F>(buf: &mut Buffer, rect: Rect, state: VisualState, palette: &Palette, draw: F)
where
    F: FnOnce(&mut Buffer, Rect),
{
    if state.is_invisible() {
        return;
    }
    let Some(target) = offset_within(rect, state.offset_x, state.offset_y, buf.area) else {
        return;
    };

    draw(buf, target);

    if state.opacity < 1.0 {
        fade_area(buf, target, palette.background, state.opacity);
    }
}

/// Blend every cell's foreground in `area` toward `background`
pub fn fade_area(buf: &mut Buffer, area: Rect, background: ratatui::style::Color, opacity: f32) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.fg = fade(cell.fg, background, opacity);
            }
        }
    }
}

/// Copy rows `src_top..` of `src` into `dst_area` of `dst`
pub fn blit(src: &Buffer, src_top: u16, dst: &mut Buffer, dst_area: Rect) {
    for row in 0..dst_area.height {
        let Some(src_y) = src_top.checked_add(row) else {
            break;
        };
        for col in 0..dst_area.width {
            let Some(cell) = src.cell((src.area.x + col, src_y)) else {
                continue;
            };
            if let Some(target) = dst.cell_mut((dst_area.x + col, dst_area.y + row)) {
                *target = cell.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Style};
    use ratatui::widgets::{Paragraph, Widget};

    #[test]
    fn test_invisible_state_draws_nothing() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        let palette = Palette::dark();
        let mut called = false;
        render_revealed(
            &mut buf,
            Rect::new(0, 0, 10, 1),
            VisualState::new(0.0, 0, 0),
            &palette,
            |_, _| called = true,
        );
        assert!(!called);
    }

    #[test]
    fn test_offset_and_fade_apply() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        let palette = Palette::dark();
        render_revealed(
            &mut buf,
            Rect::new(0, 0, 5, 1),
            VisualState::new(0.0001, 0, 1),
            &palette,
            |buf, area| {
                Paragraph::new("hello")
                    .style(Style::default().fg(Color::Rgb(255, 255, 255)))
                    .render(area, buf)
            },
        );
        let cell = buf.cell((0, 1)).unwrap();
        assert_eq!(cell.symbol(), "h");
        assert_ne!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_blit_copies_window() {
        let mut src = Buffer::empty(Rect::new(0, 0, 4, 6));
        src.set_string(0, 4, "row4", Style::default());
        let mut dst = Buffer::empty(Rect::new(0, 0, 4, 2));
        blit(&src, 4, &mut dst, Rect::new(0, 0, 4, 2));
        assert_eq!(dst.cell((0, 0)).unwrap().symbol(), "r");
        assert_eq!(dst.cell((3, 0)).unwrap().symbol(), "4");
    }
}
