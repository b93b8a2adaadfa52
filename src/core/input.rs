//! Touch tracking and inertia.
//!
//! A drag moves the target by the finger's travel times a sensitivity
//! factor and keeps a running velocity estimate.  On release that velocity
//! seeds an [`Inertia`] value that decays geometrically, one step per tick,
//! until it drops below a threshold.

use std::time::Duration;

/// One touch position sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    /// Horizontal position in pixels.
    pub x: f64,
    /// Timestamp relative to any fixed epoch (only differences matter).
    pub time: Duration,
}

impl TouchSample {
    pub fn new(x: f64, time: Duration) -> Self {
        Self { x, time }
    }
}

/// Per-gesture touch state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchState {
    pub active: bool,
    pub last_x: f64,
    pub last_time: Duration,
    /// Pixels per millisecond, times the velocity scale.
    pub velocity: f64,
}

/// What a move sample contributes to the target offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    /// Amount to add to the target.
    pub target_delta: f64,
    /// Velocity estimate after this sample.
    pub velocity: f64,
}

impl TouchState {
    /// Begin a gesture.  Velocity from any earlier gesture is discarded.
    pub fn start(&mut self, sample: TouchSample) {
        *self = Self {
            active: true,
            last_x: sample.x,
            last_time: sample.time,
            velocity: 0.0,
        };
    }

    /// Consume a move sample.  Returns `None` when no gesture is active.
    ///
    /// Dragging the finger left (decreasing `x`) scrolls forward.  When the
    /// sample carries no elapsed time the previous velocity is kept.
    pub fn drag(
        &mut self,
        sample: TouchSample,
        sensitivity: f64,
        velocity_scale: f64,
    ) -> Option<DragStep> {
        if !self.active {
            return None;
        }

        let delta = self.last_x - sample.x;
        let elapsed_ms = sample.time.saturating_sub(self.last_time).as_secs_f64() * 1000.0;
        if elapsed_ms > 0.0 {
            self.velocity = delta / elapsed_ms * velocity_scale;
        }

        self.last_x = sample.x;
        self.last_time = sample.time;

        Some(DragStep {
            target_delta: delta * sensitivity,
            velocity: self.velocity,
        })
    }

    /// End the gesture and hand back the release velocity.
    pub fn release(&mut self) -> Option<f64> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(std::mem::take(&mut self.velocity))
    }
}

/// Decaying post-release motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inertia {
    pub velocity: f64,
    pub decay: f64,
    pub threshold: f64,
}

impl Inertia {
    /// Start coasting, or `None` if the release was too slow to matter.
    pub fn launch(velocity: f64, decay: f64, threshold: f64) -> Option<Self> {
        (velocity.is_finite() && velocity.abs() > threshold).then_some(Self {
            velocity,
            decay,
            threshold,
        })
    }

    /// Decay by `frames` nominal steps and return the distance to add, or
    /// `None` once the velocity has fallen to the threshold.
    ///
    /// The contribution is the post-decay velocity, so a launch speed `V`
    /// adds up to roughly `V · d / (1 − d)` in total.
    pub fn step(&mut self, frames: f64) -> Option<f64> {
        self.velocity *= self.decay.powf(frames);
        (self.velocity.abs() > self.threshold).then(|| self.velocity * frames)
    }
}

/// Upper bound on decay steps before a launch at `velocity` stops.
pub fn max_inertia_steps(velocity: f64, decay: f64, threshold: f64) -> u32 {
    if velocity.abs() <= threshold {
        return 0;
    }
    ((threshold / velocity.abs()).ln() / decay.ln()).ceil() as u32
}
