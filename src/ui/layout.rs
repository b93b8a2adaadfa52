//! Layout helpers. Splits the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Strip pane on top, progress indicator below it, status bar at the bottom.
pub struct AppLayout {
    pub strip_area: Rect,
    pub progress_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // strip pane (takes all remaining space)
                Constraint::Length(3), // progress bar with border
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            strip_area: chunks[0],
            progress_area: chunks[1],
            status_area: chunks[2],
        }
    }
}
