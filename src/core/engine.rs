//! The scroll engine: one owning instance of every piece of motion state.
//!
//! Input handlers only move the target offset.  The host calls
//! [`ScrollEngine::step`] (or [`ScrollEngine::tick`] with a measured frame
//! time) once per display refresh while [`ScrollEngine::needs_tick`] is true
//! and renders the returned [`Frame`].  Each tick runs, in order:
//!
//! 1. one inertia decay step, if the strip is coasting after a release;
//! 2. exponential smoothing of the rendered offset toward the target;
//! 3. boundary re-centering;
//! 4. progress recomputation, snapping the bar on a wrap or reset and
//!    easing it otherwise.
//!
//! Inertia is just another contributor to the target inside the same tick,
//! so there is a single writer and no ordering hazard between the smoothing
//! loop and coasting.

use std::time::Duration;

use crate::config::EngineConfig;

use super::boundary::Boundary;
use super::error::ScrollError;
use super::geometry::{Block, Strip};
use super::input::{Inertia, TouchSample, TouchState};
use super::motion::{frame_ratio, scaled_factor, MotionState};
use super::progress::{cycle_percentage, ProgressState};

/// Everything the rendering side needs for one refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Horizontal translation to apply to the strip (content moves left by
    /// this many pixels).
    pub offset: f64,
    /// Progress bar fill, in `[0, 1]`.
    pub scale: f64,
    /// Position within the cycle, in `[0, 100)`.
    pub percentage: f64,
    /// Rounded percentage for the numeric readout.
    pub display: u32,
    /// The progress bar snapped this frame instead of easing.
    pub wrapped: bool,
    /// The host should schedule another tick.
    pub running: bool,
}

/// Infinite horizontal scroller over a strip of `B` blocks.
#[derive(Debug, Clone)]
pub struct ScrollEngine<B> {
    config: EngineConfig,
    strip: Strip<B>,
    boundary: Boundary,
    motion: MotionState,
    progress: ProgressState,
    touch: TouchState,
    inertia: Option<Inertia>,
    /// A boundary reset happened; the next tick snaps the progress bar.
    pending_snap: bool,
    last_frame: Frame,
}

impl<B: Block> ScrollEngine<B> {
    /// Build the engine and run [`setup`](Self::setup) on `blocks`.
    pub fn new(config: EngineConfig, blocks: Vec<B>) -> Result<Self, ScrollError> {
        let progress = ProgressState::new(config.wrap_low, config.wrap_high);
        let mut engine = Self {
            strip: Strip::new(blocks),
            boundary: Boundary::new(0.0, config.buffer_size),
            motion: MotionState::default(),
            progress,
            touch: TouchState::default(),
            inertia: None,
            pending_snap: false,
            last_frame: Frame {
                offset: 0.0,
                scale: 0.0,
                percentage: 0.0,
                display: 0,
                wrapped: false,
                running: false,
            },
            config,
        };
        engine.setup()?;
        Ok(engine)
    }

    /// Rebuild the clone buffer and park the strip at the start of the
    /// canonical pass.  Returns the sequence width.
    ///
    /// Calling this again (e.g. after the host changes content widths) is
    /// safe: stale clones are removed first.  Any gesture or coasting in
    /// progress is dropped.
    pub fn setup(&mut self) -> Result<f64, ScrollError> {
        let width = self.strip.rebuild(self.config.buffer_size)?;
        self.boundary = Boundary::new(width, self.config.buffer_size);
        self.motion = MotionState::at(self.boundary.home());
        self.touch = TouchState::default();
        self.inertia = None;
        self.pending_snap = false;

        self.progress.reset();
        let reading = self.progress.update(0.0, true);
        self.last_frame = Frame {
            offset: self.motion.current,
            scale: self.progress.current_scale,
            percentage: reading.percentage,
            display: reading.display,
            wrapped: reading.wrapped,
            running: false,
        };

        tracing::debug!(
            width,
            clones = self.strip.clone_count(),
            offset = self.motion.current,
            "scroll setup"
        );
        Ok(width)
    }

    /// Change how many repetitions are cloned on each side and run
    /// [`setup`](Self::setup) again.  At least one repetition is kept.
    pub fn set_buffer_size(&mut self, buffer_size: usize) -> Result<f64, ScrollError> {
        self.config.buffer_size = buffer_size.max(1);
        self.setup()
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn strip(&self) -> &Strip<B> {
        &self.strip
    }

    /// Sequence width `W` of one canonical pass.
    pub fn sequence_width(&self) -> f64 {
        self.boundary.sequence_width
    }

    /// Rendered offset.
    pub fn offset(&self) -> f64 {
        self.motion.current
    }

    /// Offset the strip is easing toward.
    pub fn target(&self) -> f64 {
        self.motion.target
    }

    /// Current touch velocity estimate.
    pub fn touch_velocity(&self) -> f64 {
        self.touch.velocity
    }

    /// `true` while released motion is still coasting.
    pub fn is_coasting(&self) -> bool {
        self.inertia.is_some()
    }

    /// The most recently produced frame.
    pub fn frame(&self) -> Frame {
        self.last_frame
    }

    /// Whether the host should keep ticking.
    ///
    /// True while the rendered offset is at least the settle epsilon away
    /// from the target, a progress snap is pending, or the strip is coasting.
    pub fn needs_tick(&self) -> bool {
        !self.motion.is_settled(self.config.settle_epsilon)
            || self.pending_snap
            || self.inertia.is_some()
    }

    // ── input ───────────────────────────────────────────────────

    /// Wheel input.  The vertical wheel delta drives horizontal motion.
    ///
    /// Returns [`needs_tick`](Self::needs_tick).
    pub fn handle_wheel(&mut self, delta: f64) -> bool {
        self.nudge(delta);
        self.needs_tick()
    }

    /// Finger down.  Motion resumes from where the strip is drawn, and any
    /// coasting from an earlier release stops.
    ///
    /// Coasting runs inside the one tick driver rather than as its own
    /// animation chain, so a new gesture replaces it instead of overlapping
    /// with it.
    pub fn handle_touch_start(&mut self, sample: TouchSample) -> bool {
        self.touch.start(sample);
        self.motion.hold();
        if self.inertia.take().is_some() {
            tracing::debug!("coasting interrupted by new touch");
        }
        self.needs_tick()
    }

    /// Finger moved.  Ignored when no touch is active.
    pub fn handle_touch_move(&mut self, sample: TouchSample) -> bool {
        if let Some(step) = self.touch.drag(
            sample,
            self.config.touch_sensitivity,
            self.config.velocity_scale,
        ) {
            self.nudge(step.target_delta);
        }
        self.needs_tick()
    }

    /// Finger lifted.  A fast enough release starts coasting.
    pub fn handle_touch_end(&mut self) -> bool {
        let Some(velocity) = self.touch.release() else {
            return self.needs_tick();
        };

        self.inertia = Inertia::launch(
            velocity,
            self.config.inertia_decay,
            self.config.inertia_threshold,
        );
        if self.inertia.is_some() {
            tracing::debug!(velocity, "coasting started");
            if self.config.fling_boost > 0.0 {
                self.nudge(velocity * self.config.fling_boost);
            }
        }
        self.needs_tick()
    }

    /// Add to the target and re-center.  Non-finite deltas are dropped.
    fn nudge(&mut self, delta: f64) {
        if !delta.is_finite() {
            tracing::debug!(delta, "ignoring non-finite scroll delta");
            return;
        }
        self.motion.target += delta;
        if self.boundary.recenter(&mut self.motion) {
            self.pending_snap = true;
        }
    }

    // ── tick driver ─────────────────────────────────────────────

    /// Advance one nominal frame.
    pub fn step(&mut self) -> Frame {
        self.tick(self.config.frame)
    }

    /// Advance by `dt`.  Per-frame constants are rescaled so that one tick
    /// of `n` frames lands where `n` single-frame ticks would (up to how
    /// coasting is sampled).
    ///
    /// When nothing needs a tick this is a no-op returning the last frame.
    pub fn tick(&mut self, dt: Duration) -> Frame {
        if !self.needs_tick() {
            self.last_frame.running = false;
            return self.last_frame;
        }

        let frames = frame_ratio(dt, self.config.frame);
        let factor = scaled_factor(self.config.smooth_factor, dt, self.config.frame);

        match self.inertia.as_mut().map(|inertia| inertia.step(frames)) {
            Some(Some(distance)) => self.nudge(distance),
            Some(None) => {
                self.inertia = None;
                tracing::debug!("coasting stopped");
            }
            None => {}
        }

        self.motion.advance(factor);
        if self.inertia.is_none() && self.motion.is_settled(self.config.settle_epsilon) {
            // Land exactly so rounding never accumulates between gestures.
            self.motion.current = self.motion.target;
        }
        if self.boundary.recenter(&mut self.motion) {
            self.pending_snap = true;
        }

        let forced = std::mem::take(&mut self.pending_snap);
        let percentage = cycle_percentage(
            self.motion.current,
            self.boundary.home(),
            self.boundary.sequence_width,
        );
        let reading = self.progress.update(percentage, forced);
        if !forced {
            self.progress.ease(factor);
        }

        self.last_frame = Frame {
            offset: self.motion.current,
            scale: self.progress.current_scale,
            percentage: reading.percentage,
            display: reading.display,
            wrapped: reading.wrapped,
            running: self.needs_tick(),
        };
        tracing::trace!(frame = ?self.last_frame, "tick");
        self.last_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::max_inertia_steps;

    #[derive(Debug, Clone)]
    struct Panel(f64);

    impl Block for Panel {
        fn width(&self) -> f64 {
            self.0
        }
    }

    /// Four panels summing to `w`.
    fn engine(w: f64) -> ScrollEngine<Panel> {
        engine_with(w, EngineConfig::default())
    }

    fn engine_with(w: f64, config: EngineConfig) -> ScrollEngine<Panel> {
        let blocks = vec![Panel(w * 0.25); 4];
        ScrollEngine::new(config, blocks).unwrap()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Drive until idle, checking the post-tick invariants on every frame.
    fn settle(e: &mut ScrollEngine<Panel>) -> Vec<Frame> {
        let w = e.sequence_width();
        let b = e.config().buffer_size as f64;
        let mut frames = Vec::new();
        while e.needs_tick() {
            let f = e.step();
            assert!(
                f.offset >= (b - 0.5) * w && f.offset < (b + 1.5) * w,
                "offset {} left the window",
                f.offset
            );
            assert!((0.0..100.0).contains(&f.percentage));
            assert!((0.0..=1.0).contains(&f.scale));
            frames.push(f);
            assert!(frames.len() < 100_000, "engine never settled");
        }
        frames
    }

    #[test]
    fn test_setup_parks_at_home() {
        let e = engine(1000.0);
        assert_eq!(e.sequence_width(), 1000.0);
        assert_eq!(e.offset(), 2000.0);
        assert_eq!(e.target(), 2000.0);
        assert!(!e.needs_tick());

        let f = e.frame();
        assert_eq!(f.percentage, 0.0);
        assert_eq!(f.display, 0);
        assert_eq!(f.scale, 0.0);
        assert!(!f.running);
    }

    #[test]
    fn test_setup_twice_is_stable() {
        let mut e = engine(1000.0);
        let clones = e.strip().clone_count();
        e.handle_wheel(730.0);
        e.step();

        assert_eq!(e.setup().unwrap(), 1000.0);
        assert_eq!(e.strip().clone_count(), clones);
        assert_eq!(e.strip().slots().len(), 4 * 5);
        assert_eq!(e.offset(), 2000.0);
        assert!(!e.needs_tick());
    }

    #[test]
    fn test_empty_content_is_rejected() {
        let err = ScrollEngine::<Panel>::new(EngineConfig::default(), Vec::new()).unwrap_err();
        assert_eq!(err, ScrollError::EmptyContent);
    }

    #[test]
    fn test_overflowing_widths_are_rejected() {
        let blocks = vec![Panel(1e308), Panel(1e308)];
        let err = ScrollEngine::new(EngineConfig::default(), blocks).unwrap_err();
        assert_eq!(err, ScrollError::SequenceWidthOverflow);
    }

    #[test]
    fn test_wheel_scenario_settles_half_way() {
        let mut e = engine(1000.0);
        assert!(e.handle_wheel(2500.0));
        assert_eq!(e.target(), 4500.0);

        let frames = settle(&mut e);
        let last = frames.last().unwrap();

        assert!((last.percentage - 50.0).abs() < 1e-6);
        assert_eq!(last.display, 50);
        assert!(!last.running);
        // Same point on the cycle as 4500, reached through whole-cycle resets.
        assert!(((e.target() - 4500.0) / 1000.0).fract().abs() < 1e-9);
        assert_eq!(e.offset(), e.target());
        assert!(frames.iter().any(|f| f.wrapped));
    }

    #[test]
    fn test_wheel_back_across_seam_snaps_once() {
        let mut e = engine(1000.0);
        e.handle_wheel(-30.0);
        let back = settle(&mut e);
        assert_eq!(back.iter().filter(|f| f.wrapped).count(), 1);
        assert!((back.last().unwrap().percentage - 97.0).abs() < 1e-6);

        e.handle_wheel(60.0);
        let forward = settle(&mut e);
        assert_eq!(forward.iter().filter(|f| f.wrapped).count(), 1);
        assert!((forward.last().unwrap().percentage - 3.0).abs() < 1e-6);

        // Every eased frame moves the bar a small step; only the snap jumps.
        let mut prev = back.last().unwrap().scale;
        for f in &forward {
            if !f.wrapped {
                assert!((f.scale - prev).abs() < 0.05, "{} -> {}", prev, f.scale);
            }
            prev = f.scale;
        }
    }

    #[test]
    fn test_touch_scenario() {
        let mut e = engine(10_000.0);
        let start = e.target();

        e.handle_touch_start(TouchSample::new(100.0, ms(0)));
        assert!(e.handle_touch_move(TouchSample::new(50.0, ms(100))));
        assert!((e.target() - start - 125.0).abs() < 1e-9);
        assert!((e.touch_velocity() - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_release_coasts_geometric_distance() {
        let mut e = engine(10_000.0);
        e.handle_touch_start(TouchSample::new(100.0, ms(0)));
        e.handle_touch_move(TouchSample::new(50.0, ms(100)));
        let released_at = e.target();

        assert!(e.handle_touch_end());
        assert!(e.is_coasting());

        let bound = max_inertia_steps(7.5, 0.95, 0.1);
        let mut ticks = 0;
        while e.is_coasting() {
            e.step();
            ticks += 1;
        }
        assert!(ticks <= bound, "coasted {ticks} ticks, bound {bound}");

        let coasted = e.target() - released_at;
        let ideal = 7.5 * 0.95 / 0.05;
        assert!((coasted - ideal).abs() <= 2.0, "coasted {coasted}");

        settle(&mut e);
        assert!(!e.needs_tick());
    }

    #[test]
    fn test_slow_release_does_not_coast() {
        let mut e = engine(1000.0);
        e.handle_touch_start(TouchSample::new(100.0, ms(0)));
        e.handle_touch_move(TouchSample::new(99.0, ms(1000)));
        e.handle_touch_end();
        assert!(!e.is_coasting());
    }

    #[test]
    fn test_new_touch_cancels_coasting() {
        let mut e = engine(1000.0);
        e.handle_touch_start(TouchSample::new(300.0, ms(0)));
        e.handle_touch_move(TouchSample::new(100.0, ms(16)));
        e.handle_touch_end();
        e.step();
        assert!(e.is_coasting());

        e.handle_touch_start(TouchSample::new(100.0, ms(500)));
        assert!(!e.is_coasting());
        assert_eq!(e.target(), e.offset());
        assert_eq!(e.touch_velocity(), 0.0);
    }

    #[test]
    fn test_touch_move_without_start_is_ignored() {
        let mut e = engine(1000.0);
        assert!(!e.handle_touch_move(TouchSample::new(10.0, ms(10))));
        assert!(!e.handle_touch_end());
        assert_eq!(e.target(), 2000.0);
    }

    #[test]
    fn test_fling_boost_pushes_once() {
        let config = EngineConfig {
            fling_boost: 20.0,
            ..EngineConfig::default()
        };
        let mut e = engine_with(100_000.0, config);
        e.handle_touch_start(TouchSample::new(100.0, ms(0)));
        e.handle_touch_move(TouchSample::new(50.0, ms(100)));
        let before = e.target();
        e.handle_touch_end();
        assert!((e.target() - before - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_window_under_mixed_input() {
        let mut e = engine(1000.0);
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        let mut t = 0;
        for round in 0..300 {
            match next() % 3 {
                0 => {
                    let delta = (next() % 60_001) as f64 - 30_000.0;
                    e.handle_wheel(delta);
                }
                _ => {
                    t += 1;
                    let x = (next() % 2000) as f64;
                    e.handle_touch_start(TouchSample::new(x, ms(t * 100)));
                    for i in 1..=5u64 {
                        let dx = (next() % 401) as f64 - 200.0;
                        e.handle_touch_move(TouchSample::new(x + dx * i as f64, ms(t * 100 + i * 8)));
                    }
                    e.handle_touch_end();
                }
            }
            // Interleave partial runs with full settles.
            if round % 5 == 0 {
                settle(&mut e);
                assert_eq!(e.offset(), e.target());
            } else {
                for _ in 0..(next() % 30) {
                    let f = e.step();
                    assert!(f.offset >= 1500.0 && f.offset < 3500.0);
                    assert!((0.0..100.0).contains(&f.percentage));
                }
            }
        }
    }

    #[test]
    fn test_long_tick_matches_single_frames() {
        let mut a = engine(1000.0);
        let mut b = engine(1000.0);
        a.handle_wheel(300.0);
        b.handle_wheel(300.0);

        a.step();
        a.step();
        b.tick(a.config().frame * 2);
        assert!((a.offset() - b.offset()).abs() < 1e-9);
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut e = engine(1000.0);
        let before = e.frame();
        let after = e.tick(ms(16));
        assert_eq!(before, after);
        assert_eq!(e.offset(), 2000.0);
    }

    #[test]
    fn test_huge_wheel_deltas_stay_in_window() {
        for delta in [1e21, -1e21] {
            let mut e = engine(1000.0);
            e.handle_wheel(delta);
            let frames = settle(&mut e);
            assert!(!frames.is_empty());
            assert!(e.offset() >= 1500.0 && e.offset() <= 2500.0);
        }
    }

    #[test]
    fn test_non_finite_input_is_ignored() {
        let mut e = engine(1000.0);
        assert!(!e.handle_wheel(f64::INFINITY));
        assert!(!e.handle_wheel(f64::NAN));
        assert_eq!(e.target(), 2000.0);

        e.handle_touch_start(TouchSample::new(100.0, ms(0)));
        e.handle_touch_move(TouchSample::new(f64::NEG_INFINITY, ms(16)));
        e.handle_touch_end();
        assert!(!e.is_coasting());
        assert!(e.offset().is_finite());
    }

    #[test]
    fn test_set_buffer_size_rebuilds_and_parks() {
        let mut e = engine(1000.0);
        e.handle_wheel(300.0);
        e.step();

        assert_eq!(e.set_buffer_size(3), Ok(1000.0));
        assert_eq!(e.offset(), 3000.0);
        assert_eq!(e.strip().clone_count(), 6 * 4);
        assert!(!e.needs_tick());

        e.set_buffer_size(0).unwrap();
        assert_eq!(e.config().buffer_size, 1);
    }
}
