// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::clamp_unit;
use sweep_taylor::Interval;

/// Normalized time window `[start, end] ⊆ [0, 1]`.
///
/// Construction clamps both ends into `[0, 1]` and orders them, so every
/// window a query sees is ascending. Converting a single time `t` yields the
/// remaining-motion window `[t, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    /// The whole motion, `[0, 1]`.
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    /// Creates a window, clamping into `[0, 1]` and swapping if reversed.
    pub fn new(start: f64, end: f64) -> Self {
        let (a, b) = (clamp_unit(start), clamp_unit(end));
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Window start.
    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Window end.
    #[must_use]
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// `end - start`.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Window as an interval.
    pub fn to_interval(self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// Bit patterns of both ends, for exact-match cache keys.
    pub fn to_bits(self) -> [u64; 2] {
        [self.start.to_bits(), self.end.to_bits()]
    }
}

impl From<f64> for TimeWindow {
    fn from(t: f64) -> Self {
        Self::new(t, 1.0)
    }
}

impl From<(f64, f64)> for TimeWindow {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}

impl From<TimeWindow> for Interval {
    fn from(window: TimeWindow) -> Self {
        window.to_interval()
    }
}
