//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas shared by every page
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(popup_x, popup_y, width, height)
}

/// Header, body, optional status line and help bar
pub fn calculate_screen_layout(area: Rect, has_status: bool) -> ScreenLayout {
    let chunks = if has_status {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area)
    };

    let (status, help) = if has_status {
        (Some(chunks[2]), chunks[3])
    } else {
        (None, chunks[2])
    };

    ScreenLayout {
        header: chunks[0],
        body: chunks[1],
        status,
        help,
    }
}

/// Shift `rect` by a signed offset, clipped to `bounds`
pub fn offset_within(rect: Rect, dx: i16, dy: i16, bounds: Rect) -> Option<Rect> {
    let x = rect.x as i32 + dx as i32;
    let y = rect.y as i32 + dy as i32;

    let left = x.max(bounds.x as i32);
    let top = y.max(bounds.y as i32);
    let right = (x + rect.width as i32).min(bounds.x as i32 + bounds.width as i32);
    let bottom = (y + rect.height as i32).min(bounds.y as i32 + bounds.height as i32);

    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_popup(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_popup(area, 40, 40), area);
    }

    #[test]
    fn test_screen_layout_with_status() {
        let layout = calculate_screen_layout(Rect::new(0, 0, 80, 24), true);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.body.height, 19);
        assert!(layout.status.is_some());
        assert_eq!(layout.help.y, 23);
    }

    #[test]
    fn test_offset_within() {
        let bounds = Rect::new(0, 0, 10, 10);
        assert_eq!(
            offset_within(Rect::new(2, 2, 4, 4), 1, -1, bounds),
            Some(Rect::new(3, 1, 4, 4))
        );
        assert_eq!(
            offset_within(Rect::new(8, 0, 4, 4), 0, 0, bounds),
            Some(Rect::new(8, 0, 2, 4))
        );
        assert_eq!(offset_within(Rect::new(0, 8, 4, 4), 0, 5, bounds), None);
    }
}
