//! Scroll state and exponential smoothing.
//!
//! Input handlers move `target`; each tick pulls `current` a fixed fraction
//! of the remaining distance toward it.  This is a single-pole low-pass
//! filter: at a factor of 0.05 per 60 Hz frame the time constant is roughly
//! twenty frames.

use std::time::Duration;

/// Linear interpolation between two values.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Per-frame smoothing factor rescaled to an arbitrary frame duration.
///
/// Applying the returned factor once over `dt` moves as far as applying
/// `factor` once per `frame` for `dt / frame` frames.
pub fn scaled_factor(factor: f64, dt: Duration, frame: Duration) -> f64 {
    let frames = frame_ratio(dt, frame);
    1.0 - (1.0 - factor).powf(frames)
}

/// How many nominal frames `dt` spans.  A zero-length frame counts as one.
#[inline]
pub fn frame_ratio(dt: Duration, frame: Duration) -> f64 {
    if frame.is_zero() {
        1.0
    } else {
        dt.as_secs_f64() / frame.as_secs_f64()
    }
}

/// Target and rendered position on the unbounded virtual axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    pub target: f64,
    pub current: f64,
}

impl MotionState {
    /// Start at rest at `offset`.
    pub fn at(offset: f64) -> Self {
        Self {
            target: offset,
            current: offset,
        }
    }

    /// Move `current` toward `target` by `factor` of the remaining distance.
    pub fn advance(&mut self, factor: f64) {
        self.current = lerp(self.current, self.target, factor);
    }

    /// Remaining distance between rendered and target position.
    #[inline]
    pub fn gap(&self) -> f64 {
        (self.target - self.current).abs()
    }

    /// True once the gap has dropped below `epsilon`.
    #[inline]
    pub fn is_settled(&self, epsilon: f64) -> bool {
        self.gap() < epsilon
    }

    /// Move `current` to `position` and carry the target along by the same
    /// displacement, which is returned.
    pub fn relocate(&mut self, position: f64) -> f64 {
        let shift = position - self.current;
        self.current = position;
        self.target += shift;
        shift
    }

    /// Drop any residual divergence so motion resumes from what is visible.
    pub fn hold(&mut self) {
        self.target = self.current;
    }
}
