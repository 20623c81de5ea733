//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub toolbar: Rect,
    pub table: Rect,
    pub status: Rect,
}

/// Calculate main screen layout: toolbar on top, status bar at the
/// bottom, cabin table in between. Dialogs are not part of this tree;
/// they render through the overlay anchor over the full frame.
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    MainLayout {
        toolbar: chunks[0],
        table: chunks[1],
        status: chunks[2],
    }
}
