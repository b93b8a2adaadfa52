//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Background colours cycled across the canonical panels.
const PANEL_COLORS: &[Color] = &[
    Color::Rgb(0x2e, 0x34, 0x40),
    Color::Rgb(0x3b, 0x42, 0x52),
    Color::Rgb(0x43, 0x4c, 0x5e),
    Color::Rgb(0x4c, 0x56, 0x6a),
    Color::Rgb(0x5e, 0x81, 0xac),
    Color::Rgb(0x81, 0xa1, 0xc1),
];

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── strip ──────────────────────────────────────────────────
    pub fn panel_bg(index: usize) -> Color {
        PANEL_COLORS[index % PANEL_COLORS.len()]
    }

    pub fn panel_title_style(bg: Color) -> Style {
        Style::default()
            .bg(bg)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn panel_tag_style(bg: Color) -> Style {
        Style::default()
            .bg(bg)
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn seam_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    // ── progress ───────────────────────────────────────────────
    pub fn progress_fill_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn progress_track_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn progress_counter_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
