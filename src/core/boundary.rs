//! Boundary re-centering.
//!
//! The virtual axis is periodic with period `W`, so shifting both the target
//! and the rendered position by a whole number of cycles changes nothing on
//! screen (clones cover both sides) while keeping the numbers small no matter
//! how far the user has scrolled.

use super::motion::MotionState;

/// The window `current` is kept inside, in units of the sequence width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub sequence_width: f64,
    pub buffer_size: usize,
}

impl Boundary {
    pub fn new(sequence_width: f64, buffer_size: usize) -> Self {
        Self {
            sequence_width,
            buffer_size,
        }
    }

    /// Offset at which the canonical pass starts at the left edge.
    #[inline]
    pub fn home(&self) -> f64 {
        self.sequence_width * self.buffer_size as f64
    }

    /// Shift threshold on the high side: half a cycle past home.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.home() + self.sequence_width * 0.5
    }

    /// Shift threshold on the low side: half a cycle before home.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.home() - self.sequence_width * 0.5
    }

    /// Bring `current` back within half a cycle of home.
    ///
    /// Shifts target and current together by a whole number of cycles and
    /// returns `true` when a shift happened.  Values exactly on a threshold
    /// are left alone.  `current` lands inside the window even when it is
    /// so large that a single cycle is below its rounding step.
    pub fn recenter(&self, motion: &mut MotionState) -> bool {
        let outside = motion.current > self.upper() || motion.current < self.lower();
        if !outside {
            return false;
        }

        let w = self.sequence_width;
        let landed = self.lower() + (motion.current - self.lower()).rem_euclid(w);
        let shift = motion.relocate(landed);
        let cycles = (shift / w).round();
        tracing::debug!(
            cycles,
            current = motion.current,
            target = motion.target,
            "boundary reset"
        );
        true
    }
}
