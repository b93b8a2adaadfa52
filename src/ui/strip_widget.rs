//! Strip widget. Draws the laid-out content blocks translated by the
//! engine offset.
//!
//! Each slot occupies `width / px_per_column` terminal columns.  Slots are
//! placed left to right starting at pixel 0 and the whole strip is shifted
//! left by `offset` pixels, the terminal equivalent of `translateX(-offset)`.

use loopscroll::{Block as ContentBlock, Slot};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Widget},
};

use super::theme::Theme;
use crate::app::state::Panel;

pub struct StripWidget<'a> {
    slots: &'a [Slot<Panel>],
    offset: f64,
    px_per_column: f64,
    block: Option<Block<'a>>,
}

impl<'a> StripWidget<'a> {
    pub fn new(slots: &'a [Slot<Panel>], offset: f64, px_per_column: f64) -> Self {
        Self {
            slots,
            offset,
            px_per_column,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for StripWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 || self.px_per_column <= 0.0 {
            return;
        }

        let view = i64::from(inner.width);
        let mut left_px = 0.0;
        for slot in self.slots {
            let width = slot.block.width();
            let start = ((left_px - self.offset) / self.px_per_column).floor() as i64;
            let end = ((left_px + width - self.offset) / self.px_per_column).floor() as i64;
            left_px += width;

            if end <= 0 {
                continue;
            }
            if start >= view {
                break;
            }
            let span = Span {
                start: start.max(0),
                end: end.min(view),
            };
            render_slot(slot, start, span, inner, buf);
        }
    }
}

/// Visible column range of a slot, relative to the inner area.
#[derive(Clone, Copy)]
struct Span {
    start: i64,
    end: i64,
}

fn render_slot(slot: &Slot<Panel>, start: i64, span: Span, inner: Rect, buf: &mut Buffer) {
    let bg = Theme::panel_bg(slot.block.index);

    for row in 0..inner.height {
        for col in span.start..span.end {
            let pos = Position::new(inner.x + col as u16, inner.y + row);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.reset();
                cell.set_bg(bg);
            }
        }
    }

    // Seam marker at the first panel of every repetition.
    if slot.block.index == 0 && start >= 0 {
        for row in 0..inner.height {
            let pos = Position::new(inner.x + start as u16, inner.y + row);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char('┃').set_style(Theme::seam_style().bg(bg));
            }
        }
    }

    let tag = match slot.tag {
        Some(tag) => tag.label(),
        None => "canonical".to_string(),
    };
    put_clipped(buf, inner, span, start + 2, 1, &slot.block.title, Theme::panel_title_style(bg));
    put_clipped(buf, inner, span, start + 2, 2, &tag, Theme::panel_tag_style(bg));
}

/// Write `text` starting at column `col` of `row`, dropping characters that
/// fall outside `span`.
fn put_clipped(buf: &mut Buffer, inner: Rect, span: Span, col: i64, row: u16, text: &str, style: Style) {
    if row >= inner.height {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let c = col + i as i64;
        if c < span.start {
            continue;
        }
        if c >= span.end {
            break;
        }
        let pos = Position::new(inner.x + c as u16, inner.y + row);
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(ch).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopscroll::Strip;

    fn panels() -> Vec<Panel> {
        (0..2)
            .map(|index| Panel {
                index,
                title: format!("P{index}"),
                width: 80.0,
            })
            .collect()
    }

    fn symbol(buf: &Buffer, x: u16, y: u16) -> String {
        buf.cell(Position::new(x, y))
            .map(|c| c.symbol().to_string())
            .unwrap_or_default()
    }

    fn bg(buf: &Buffer, x: u16, y: u16) -> Option<ratatui::style::Color> {
        buf.cell(Position::new(x, y)).map(|c| c.bg)
    }

    #[test]
    fn test_panels_fill_their_columns() {
        let mut strip = Strip::new(panels());
        strip.rebuild(0).unwrap();

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        StripWidget::new(strip.slots(), 0.0, 8.0).render(area, &mut buf);

        assert_eq!(bg(&buf, 1, 0), Some(Theme::panel_bg(0)));
        assert_eq!(bg(&buf, 9, 0), Some(Theme::panel_bg(0)));
        assert_eq!(bg(&buf, 10, 0), Some(Theme::panel_bg(1)));
        assert_eq!(symbol(&buf, 0, 0), "┃");
        assert_eq!(symbol(&buf, 2, 1), "P");
        assert_eq!(symbol(&buf, 3, 1), "0");
        assert_eq!(symbol(&buf, 12, 1), "P");
        assert_eq!(symbol(&buf, 12, 2), "c");
    }

    #[test]
    fn test_offset_shifts_and_clips() {
        let mut strip = Strip::new(panels());
        strip.rebuild(1).unwrap();

        // Park at home: the canonical pass starts at the left edge.
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        StripWidget::new(strip.slots(), 160.0, 8.0).render(area, &mut buf);
        assert_eq!(symbol(&buf, 0, 0), "┃");
        assert_eq!(symbol(&buf, 2, 2), "c");

        // Half a panel further: panel 0 is cut, its title dropped.
        let mut buf = Buffer::empty(area);
        StripWidget::new(strip.slots(), 200.0, 8.0).render(area, &mut buf);
        assert_eq!(bg(&buf, 0, 0), Some(Theme::panel_bg(0)));
        assert_eq!(bg(&buf, 5, 0), Some(Theme::panel_bg(1)));
        assert_eq!(symbol(&buf, 0, 1), " ");
        // The next repetition's first panel appears on the right.
        assert_eq!(symbol(&buf, 15, 0), "┃");
        assert_eq!(symbol(&buf, 17, 2), "1");
    }
}
