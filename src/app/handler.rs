//! Input handling: maps key/mouse events onto engine input.
//!
//! The mouse wheel stands in for a trackpad (vertical wheel motion scrolls
//! the strip sideways) and a left-button drag stands in for a touch gesture.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use loopscroll::TouchSample;

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Right | KeyCode::Char('l') => {
            state.engine.handle_wheel(state.config.wheel_step);
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.engine.handle_wheel(-state.config.wheel_step);
        }
        KeyCode::Char('r') => reset(state),
        _ => {}
    }
}

/// Re-run setup: rebuild clones and park at the start.
fn reset(state: &mut AppState) {
    match state.engine.setup() {
        Ok(width) => {
            state.frame = state.engine.frame();
            state.status_message = Some(format!("Reset, cycle width {width:.0}px"));
        }
        Err(err) => {
            tracing::warn!("setup failed: {err}");
            state.status_message = Some(format!("Reset failed: {err}"));
        }
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = state.config.wheel_step;
    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            state.engine.handle_wheel(step);
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            state.engine.handle_wheel(-step);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let sample = touch_sample(state, mouse.column);
            state.engine.handle_touch_start(sample);
            state.status_message = None;
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let sample = touch_sample(state, mouse.column);
            state.engine.handle_touch_move(sample);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.engine.handle_touch_end();
        }
        _ => {}
    }
}

fn touch_sample(state: &AppState, column: u16) -> TouchSample {
    TouchSample::new(
        f64::from(column) * state.config.px_per_column,
        state.elapsed(),
    )
}
