//! Shared modal overlay utilities: centering, dimming and shadows.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::theme::palette;

/// Center a fixed-size rect within an area, clamped to the area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Restyle every cell in `area` as dimmed background
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// 1-cell shadow along the right and bottom edges of `modal`
pub fn render_shadow(buf: &mut Buffer, modal: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);
    let right_x = modal.right();
    let bottom_y = modal.bottom();

    let right_edge = (modal.y.saturating_add(1)..=bottom_y).map(|y| (right_x, y));
    let bottom_edge = (modal.x.saturating_add(1)..=right_x).map(|x| (x, bottom_y));

    for pos in right_edge.chain(bottom_edge) {
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

/// Dim `area`, then return a cleared, shadowed rect for modal content
pub fn open_modal(buf: &mut Buffer, area: Rect, width: u16, height: u16) -> Rect {
    dim_background(buf, area);
    let modal = centered_rect(width, height, area);
    render_shadow(buf, modal);
    Clear.render(modal, buf);
    modal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        let result = centered_rect(40, 12, area);
        assert_eq!((result.width, result.height), (30, 10));
    }

    #[test]
    fn test_dim_background_covers_area() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        dim_background(&mut buf, area);

        for y in 0..5 {
            for x in 0..10 {
                assert_eq!(buf[(x, y)].bg, palette::DEEPEST_BG);
            }
        }
    }

    #[test]
    fn test_shadow_stays_inside_buffer() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);

        // Modal touching the edge: shadow cells fall outside and are skipped
        render_shadow(&mut buf, Rect::new(10, 4, 10, 6));
        render_shadow(&mut buf, Rect::new(2, 2, 5, 3));

        assert_eq!(buf[(7, 3)].bg, palette::SHADOW);
        assert_eq!(buf[(3, 5)].bg, palette::SHADOW);
    }

    #[test]
    fn test_open_modal_returns_centered_rect() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        let modal = open_modal(&mut buf, area, 20, 6);
        assert_eq!(modal, Rect::new(10, 7, 20, 6));
    }
}
