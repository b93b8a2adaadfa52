//! Cyclic progress.
//!
//! Maps the rendered offset onto a `[0, 100)` position within the current
//! cycle and drives the progress bar scale.  The scale is eased separately
//! from the offset so it can snap when the percentage wraps; easing across a
//! wrap would sweep the bar over its full width backwards.

/// Result of one progress recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReading {
    /// Position within the cycle, in `[0, 100)`.
    pub percentage: f64,
    /// `percentage` rounded for the numeric readout.
    pub display: u32,
    /// The scale snapped this tick instead of easing.
    pub wrapped: bool,
}

/// Percentage of the way through the current cycle for `offset`.
///
/// `sequence_width` must be positive.
pub fn cycle_percentage(offset: f64, home: f64, sequence_width: f64) -> f64 {
    let position = (offset - home).rem_euclid(sequence_width);
    let percentage = position / sequence_width * 100.0;
    // rem_euclid can round up to exactly `sequence_width` for tiny negatives.
    if percentage >= 100.0 {
        0.0
    } else {
        percentage
    }
}

/// Progress bar state, independent from the scroll smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    pub last_percentage: f64,
    pub current_scale: f64,
    pub target_scale: f64,
    /// Above this, a drop below `wrap_low` counts as a wrap (and vice versa).
    pub wrap_high: f64,
    pub wrap_low: f64,
}

impl ProgressState {
    pub fn new(wrap_low: f64, wrap_high: f64) -> Self {
        Self {
            last_percentage: 0.0,
            current_scale: 0.0,
            target_scale: 0.0,
            wrap_high,
            wrap_low,
        }
    }

    /// Back to the start of the cycle with the bar empty.
    pub fn reset(&mut self) {
        self.last_percentage = 0.0;
        self.current_scale = 0.0;
        self.target_scale = 0.0;
    }

    /// Did the percentage jump across the cycle seam since the last reading?
    pub fn is_wrap(&self, percentage: f64) -> bool {
        (self.last_percentage > self.wrap_high && percentage < self.wrap_low)
            || (self.last_percentage < self.wrap_low && percentage > self.wrap_high)
    }

    /// Record a new percentage.  On a wrap, or when `force_snap` is set, the
    /// bar jumps straight to the new scale.
    pub fn update(&mut self, percentage: f64, force_snap: bool) -> ProgressReading {
        let wrapped = force_snap || self.is_wrap(percentage);

        self.target_scale = percentage / 100.0;
        if wrapped {
            self.current_scale = self.target_scale;
        }
        self.last_percentage = percentage;

        ProgressReading {
            percentage,
            display: percentage.round() as u32,
            wrapped,
        }
    }

    /// Ease the bar toward its target.  Skipped on ticks that snapped.
    pub fn ease(&mut self, factor: f64) {
        self.current_scale = super::motion::lerp(self.current_scale, self.target_scale, factor);
    }
}
