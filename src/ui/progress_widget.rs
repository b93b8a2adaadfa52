//! Progress indicator: a horizontal bar filled to the engine's scale plus
//! the rounded percentage readout on its right.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use super::theme::Theme;

/// Columns reserved for the `" 42%"` counter.
const COUNTER_WIDTH: u16 = 5;

pub struct ProgressWidget<'a> {
    /// Fill fraction in `[0, 1]`.
    pub scale: f64,
    /// Rounded percentage.
    pub display: u32,
    pub block: Option<Block<'a>>,
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width <= COUNTER_WIDTH || inner.height == 0 {
            return;
        }

        let bar_width = inner.width - COUNTER_WIDTH;
        let filled = (f64::from(bar_width) * self.scale.clamp(0.0, 1.0)).round() as u16;
        for col in 0..bar_width {
            let (ch, style) = if col < filled {
                ('█', Theme::progress_fill_style())
            } else {
                ('─', Theme::progress_track_style())
            };
            if let Some(cell) = buf.cell_mut(Position::new(inner.x + col, inner.y)) {
                cell.set_char(ch).set_style(style);
            }
        }

        let counter = Line::from(Span::styled(
            format!("{:>4}%", self.display),
            Theme::progress_counter_style(),
        ));
        buf.set_line(inner.x + bar_width, inner.y, &counter, COUNTER_WIDTH);
    }
}
