//! Terminal demo for the infinite horizontal scroll engine.
//!
//! Scroll the strip with the mouse wheel, drag it with the left button, or
//! nudge it with the arrow keys.  Run with `--simulate <DELTA>` to drive the
//! engine headless and print where it settles.

mod app;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use loopscroll::config::{PANELS_RANGE, PANEL_WIDTH_RANGE};
use loopscroll::AppConfig;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::ui::{
    layout::AppLayout, progress_widget::ProgressWidget, strip_widget::StripWidget, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Infinite horizontal scroll demo")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/loopscroll/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of canonical panels.
    #[arg(long)]
    panels: Option<usize>,

    /// Base panel width in pixels.
    #[arg(long)]
    panel_width: Option<f64>,

    /// Repetitions cloned on each side of the canonical panels.
    #[arg(long)]
    buffer_size: Option<usize>,

    /// Animation frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Apply one wheel delta without a terminal, run until idle and print
    /// the settled position.
    #[arg(long, allow_hyphen_values = true, value_name = "DELTA")]
    simulate: Option<f64>,

    /// Write the effective settings (file plus flags) to the config file
    /// and exit.
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    fn app_config(&self) -> AppConfig {
        let mut cfg = match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        };
        if let Some(n) = self.panels {
            cfg.panels = n.clamp(PANELS_RANGE.0, PANELS_RANGE.1);
        }
        if let Some(w) = self.panel_width.filter(|w| w.is_finite()) {
            cfg.panel_width = w.clamp(PANEL_WIDTH_RANGE.0, PANEL_WIDTH_RANGE.1);
        }
        if let Some(b) = self.buffer_size {
            cfg.engine.buffer_size = b.max(1);
        }
        if let Some(fps) = self.fps {
            cfg.fps = fps.clamp(10, 240);
        }
        cfg
    }
}

// ───────────────────────────────────────── headless ─────────

fn simulate(mut state: AppState, delta: f64) {
    let start = state.engine.offset();
    state.engine.handle_wheel(delta);

    let mut ticks = 0u64;
    let mut snaps = 0u64;
    while state.engine.needs_tick() {
        let frame = state.engine.step();
        ticks += 1;
        if frame.wrapped {
            snaps += 1;
        }
    }

    let frame = state.engine.frame();
    println!(
        "cycle width {:.1}px, start {:.1}, wheel {:+.1}",
        state.engine.sequence_width(),
        start,
        delta
    );
    println!(
        "settled after {ticks} ticks ({snaps} progress snaps): offset {:.2}, progress {}%",
        frame.offset, frame.display
    );
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let config = cli.app_config();

    if cli.save_config {
        let path = match &cli.config {
            Some(path) => {
                config.save_to(path)?;
                path.clone()
            }
            None => {
                config.save()?;
                loopscroll::config::config_path()
            }
        };
        println!("wrote {}", path.display());
        return Ok(());
    }

    let mut state = AppState::new(config)?;

    // ── headless mode ─────────────────────────────────────────
    if let Some(delta) = cli.simulate {
        simulate(state, delta);
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;
    state.fit_viewport(terminal.size()?.width);

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
) -> Result<()> {
    let mut events = spawn_event_reader(state.config.tick_rate());

    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());

            let strip_block = Block::default()
                .title(format!(
                    " loopscroll · cycle {:.0}px ",
                    state.engine.sequence_width()
                ))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            let strip = StripWidget::new(
                state.engine.strip().slots(),
                state.frame.offset,
                state.config.px_per_column,
            )
            .block(strip_block);
            frame.render_widget(strip, layout.strip_area);

            let progress = ProgressWidget {
                scale: state.frame.scale,
                display: state.frame.display,
                block: Some(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Theme::border_style()),
                ),
            };
            frame.render_widget(progress, layout.progress_area);

            let hint = format!(
                "wheel/drag: scroll | ←/→: nudge | r: reset | q: quit | offset {:.1}",
                state.frame.offset
            );
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Resize(width, _) => state.fit_viewport(width),
            AppEvent::Tick => state.on_tick(),
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
