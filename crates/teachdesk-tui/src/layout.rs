//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Header: top border + title row + bottom border
const HEADER_HEIGHT: u16 = 3;

/// Footer: status line + key hints
const FOOTER_HEIGHT: u16 = 2;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, current screen and the credential pill
    pub header: Rect,

    /// The active screen
    pub body: Rect,

    /// Error / notice line and key hints
    pub footer: Rect,
}

/// Split the terminal into header, body and footer
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

/// Plan text on the left, visual aid and sources on the right.
///
/// Narrow terminals stack the side panel under the plan.
pub fn result_columns(area: Rect) -> (Rect, Rect) {
    let chunks = if area.width >= 100 {
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).split(area)
    } else {
        Layout::vertical([Constraint::Min(5), Constraint::Length(9)]).split(area)
    };
    (chunks[0], chunks[1])
}
