//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes engine [`Frame`](loopscroll::Frame)s and turns them into
//! cells on the terminal.  No scroll arithmetic happens here beyond mapping
//! pixels to columns.

pub mod layout;
pub mod progress_widget;
pub mod strip_widget;
pub mod theme;
