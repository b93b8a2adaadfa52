//! User configuration: engine tuning, demo settings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/loopscroll/config.toml` (default `~/.config/loopscroll/config.toml`).

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Accepted demo panel widths in pixels.
pub const PANEL_WIDTH_RANGE: (f64, f64) = (16.0, 10_000.0);
/// Accepted number of demo panels.
pub const PANELS_RANGE: (usize, usize) = (1, 64);

// ───────────────────────────────────────── engine ────────────

/// Tuning constants for the scroll engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fraction of the remaining distance covered per frame.
    pub smooth_factor: f64,
    /// Target pixels per pixel of finger travel.
    pub touch_sensitivity: f64,
    /// Full repetitions cloned on each side of the canonical content.
    pub buffer_size: usize,
    /// Motion stops once target and current are closer than this.
    pub settle_epsilon: f64,
    /// Multiplier from px/ms finger speed to release velocity.
    pub velocity_scale: f64,
    /// Per-frame velocity multiplier while coasting.
    pub inertia_decay: f64,
    /// Coasting stops at or below this speed.
    pub inertia_threshold: f64,
    /// Percentages under this count as "just after the seam".
    pub wrap_low: f64,
    /// Percentages over this count as "just before the seam".
    pub wrap_high: f64,
    /// Extra one-off push of `velocity × fling_boost` on release.
    pub fling_boost: f64,
    /// Nominal frame duration the per-frame constants are tuned for.
    pub frame: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smooth_factor: 0.05,
            touch_sensitivity: 2.5,
            buffer_size: 2,
            settle_epsilon: 0.01,
            velocity_scale: 15.0,
            inertia_decay: 0.95,
            inertia_threshold: 0.1,
            wrap_low: 20.0,
            wrap_high: 80.0,
            fling_boost: 0.0,
            frame: Duration::from_nanos(16_666_667),
        }
    }
}

// ───────────────────────────────────────── app ───────────────

/// Application configuration: engine tuning plus terminal demo settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Redraw rate while the strip is moving.
    pub fps: u32,
    /// Virtual pixels per terminal column.
    pub px_per_column: f64,
    /// Wheel delta in pixels per notch.
    pub wheel_step: f64,
    /// Number of canonical panels in the demo strip.
    pub panels: usize,
    /// Width of each demo panel in pixels.
    pub panel_width: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            fps: 60,
            px_per_column: 8.0,
            wheel_step: 40.0,
            panels: 6,
            panel_width: 320.0,
        }
    }
}

impl AppConfig {
    /// Duration between animation ticks.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                tracing::debug!("config {} not loaded: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    /// Parse `key = value` lines.  Unknown keys and unparsable values are
    /// skipped; numeric values are clamped to sane ranges.
    pub fn parse(s: &str) -> Self {
        let mut cfg = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            let float = || value.parse::<f64>().ok().filter(|v| v.is_finite());
            match key {
                "smooth_factor" => {
                    if let Some(v) = float() {
                        cfg.engine.smooth_factor = v.clamp(0.001, 1.0);
                    }
                }
                "touch_sensitivity" => {
                    if let Some(v) = float() {
                        cfg.engine.touch_sensitivity = v.clamp(0.0, 50.0);
                    }
                }
                "buffer_size" => {
                    if let Ok(v) = value.parse::<usize>() {
                        // One clone per side is the least that hides a reset.
                        cfg.engine.buffer_size = v.clamp(1, 16);
                    }
                }
                "settle_epsilon" => {
                    if let Some(v) = float() {
                        cfg.engine.settle_epsilon = v.clamp(1e-6, 10.0);
                    }
                }
                "velocity_scale" => {
                    if let Some(v) = float() {
                        cfg.engine.velocity_scale = v.clamp(0.0, 1000.0);
                    }
                }
                "inertia_decay" => {
                    if let Some(v) = float() {
                        cfg.engine.inertia_decay = v.clamp(0.0, 0.999);
                    }
                }
                "inertia_threshold" => {
                    if let Some(v) = float() {
                        cfg.engine.inertia_threshold = v.clamp(1e-3, 100.0);
                    }
                }
                "wrap_low" => {
                    if let Some(v) = float() {
                        cfg.engine.wrap_low = v.clamp(0.0, 50.0);
                    }
                }
                "wrap_high" => {
                    if let Some(v) = float() {
                        cfg.engine.wrap_high = v.clamp(50.0, 100.0);
                    }
                }
                "fling_boost" => {
                    if let Some(v) = float() {
                        cfg.engine.fling_boost = v.clamp(0.0, 100.0);
                    }
                }
                "fps" => {
                    if let Ok(v) = value.parse::<u32>() {
                        cfg.fps = v.clamp(10, 240);
                    }
                }
                "px_per_column" => {
                    if let Some(v) = float() {
                        cfg.px_per_column = v.clamp(1.0, 64.0);
                    }
                }
                "wheel_step" => {
                    if let Some(v) = float() {
                        cfg.wheel_step = v.clamp(1.0, 2000.0);
                    }
                }
                "panels" => {
                    if let Ok(v) = value.parse::<usize>() {
                        cfg.panels = v.clamp(PANELS_RANGE.0, PANELS_RANGE.1);
                    }
                }
                "panel_width" => {
                    if let Some(v) = float() {
                        cfg.panel_width = v.clamp(PANEL_WIDTH_RANGE.0, PANEL_WIDTH_RANGE.1);
                    }
                }
                other => tracing::debug!("ignoring unknown config key {other:?}"),
            }
        }

        cfg
    }

    fn serialise(&self) -> String {
        let e = &self.engine;
        let lines = [
            "# loopscroll configuration".to_string(),
            String::new(),
            "# Engine".to_string(),
            format!("smooth_factor = {}", e.smooth_factor),
            format!("touch_sensitivity = {}", e.touch_sensitivity),
            format!("buffer_size = {}", e.buffer_size),
            format!("settle_epsilon = {}", e.settle_epsilon),
            format!("velocity_scale = {}", e.velocity_scale),
            format!("inertia_decay = {}", e.inertia_decay),
            format!("inertia_threshold = {}", e.inertia_threshold),
            format!("wrap_low = {}", e.wrap_low),
            format!("wrap_high = {}", e.wrap_high),
            format!("fling_boost = {}", e.fling_boost),
            String::new(),
            "# Terminal demo".to_string(),
            format!("fps = {}", self.fps),
            format!("px_per_column = {}", self.px_per_column),
            format!("wheel_step = {}", self.wheel_step),
            format!("panels = {}", self.panels),
            format!("panel_width = {}", self.panel_width),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/loopscroll/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("loopscroll").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.engine.smooth_factor, 0.05);
        assert_eq!(cfg.engine.touch_sensitivity, 2.5);
        assert_eq!(cfg.engine.buffer_size, 2);
        assert_eq!(cfg.engine.inertia_decay, 0.95);
        assert_eq!(cfg.engine.fling_boost, 0.0);
        assert_eq!(cfg.tick_rate(), Duration::from_millis(16));
    }

    #[test]
    fn test_parse_overrides_and_clamps() {
        let cfg = AppConfig::parse(
            "# comment\n\
             [engine]\n\
             smooth_factor = 0.1\n\
             buffer_size = 0\n\
             wrap_high = 300\n\
             fling_boost = \"20\"\n\
             fps = 30\n\
             panels = nope\n\
             mystery = 4\n\
             not a pair\n",
        );
        assert_eq!(cfg.engine.smooth_factor, 0.1);
        assert_eq!(cfg.engine.buffer_size, 1);
        assert_eq!(cfg.engine.wrap_high, 100.0);
        assert_eq!(cfg.engine.fling_boost, 20.0);
        assert_eq!(cfg.fps, 30);
        assert_eq!(cfg.panels, AppConfig::default().panels);
    }

    #[test]
    fn test_rejects_non_finite() {
        let cfg = AppConfig::parse("touch_sensitivity = NaN\nwheel_step = inf\n");
        assert_eq!(cfg.engine.touch_sensitivity, 2.5);
        assert_eq!(cfg.wheel_step, 40.0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("loopscroll-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.engine.buffer_size = 3;
        cfg.engine.fling_boost = 20.0;
        cfg.panel_width = 250.0;
        cfg.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded, cfg);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let cfg = AppConfig::load_from(Path::new("/definitely/not/here/config.toml"));
        assert_eq!(cfg, AppConfig::default());
    }
}
