//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use loopscroll::{AppConfig, Block, Frame, ScrollEngine, ScrollError};

/// One demo content block.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Position in the canonical pass (drives the colour).
    pub index: usize,
    pub title: String,
    pub width: f64,
}

impl Block for Panel {
    fn width(&self) -> f64 {
        self.width
    }
}

/// Build `count` panels around `base_width`, alternating narrow, regular and
/// wide so the seam is easy to spot.
pub fn demo_panels(count: usize, base_width: f64) -> Vec<Panel> {
    const SIZES: [f64; 3] = [1.0, 0.75, 1.25];
    (0..count)
        .map(|index| Panel {
            index,
            title: format!("Panel {}", index + 1),
            width: base_width * SIZES[index % SIZES.len()],
        })
        .collect()
}

/// Top-level application state.
pub struct AppState {
    pub engine: ScrollEngine<Panel>,
    pub config: AppConfig,
    /// Latest frame produced by the engine.
    pub frame: Frame,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Epoch for touch timestamps.
    pub started: Instant,
    /// When the engine last ticked, for measuring frame time.
    pub last_tick: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, ScrollError> {
        let panels = demo_panels(config.panels, config.panel_width);
        let engine = ScrollEngine::new(config.engine.clone(), panels)?;
        let now = Instant::now();
        Ok(Self {
            frame: engine.frame(),
            engine,
            config,
            should_quit: false,
            status_message: None,
            started: now,
            last_tick: now,
        })
    }

    /// Time since startup, used to stamp touch samples.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Grow the clone buffer until the strip covers `columns` terminal
    /// columns from anywhere in the re-centering window.
    ///
    /// With `n` repetitions per side and `current` at most half a cycle past
    /// home, the strip ends `(n + 0.5)·W` to the right of the view's left
    /// edge.  Growing re-runs setup, so the strip parks at the start.
    pub fn fit_viewport(&mut self, columns: u16) {
        let view = f64::from(columns) * self.config.px_per_column;
        let needed = (view / self.engine.sequence_width() - 0.5).ceil().max(1.0) as usize;
        if needed <= self.engine.config().buffer_size {
            return;
        }
        match self.engine.set_buffer_size(needed) {
            Ok(_) => {
                self.frame = self.engine.frame();
                tracing::debug!(columns, buffer_size = needed, "clone buffer grown to fit view");
            }
            Err(err) => tracing::warn!("resizing clone buffer failed: {err}"),
        }
    }

    /// Advance the engine by the wall time since the previous tick.
    ///
    /// Long stalls are capped at four frames so the strip does not leap.
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick);
        self.last_tick = now;

        if self.engine.needs_tick() {
            let cap = self.engine.config().frame * 4;
            self.frame = self.engine.tick(dt.min(cap));
        }
    }
}
