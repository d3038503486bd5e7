// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::clamp_unit;
use sweep_taylor::Interval;

use crate::curve::{clamp_window, Interpolation};
use crate::data::{InterpolationData, InterpolationKind};
use crate::error::InterpolationError;
use crate::factory::InterpolationFactory;

/// Constant-velocity interpolation `start + (end − start)·t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearInterpolation {
    start: f64,
    end: f64,
}

impl LinearInterpolation {
    /// Creates a linear curve between finite endpoints.
    pub fn new(start: f64, end: f64) -> Result<Self, InterpolationError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(InterpolationError::NonFinite { start, end });
        }
        Ok(Self { start, end })
    }

    /// Factory constructor for [`InterpolationKind::Linear`].
    pub fn create(
        data: &InterpolationData,
        start: f64,
        end: f64,
    ) -> Result<Box<dyn Interpolation>, InterpolationError> {
        match data {
            InterpolationData::Linear => Ok(Box::new(Self::new(start, end)?)),
            other => Err(InterpolationError::KindMismatch {
                expected: InterpolationKind::Linear,
                found: other.kind(),
            }),
        }
    }

    /// Registers [`LinearInterpolation::create`] with `factory`.
    pub fn register(factory: &mut InterpolationFactory) {
        factory.register_class(InterpolationKind::Linear, Self::create);
    }

    fn delta(&self) -> f64 {
        self.end - self.start
    }
}

impl Interpolation for LinearInterpolation {
    fn kind(&self) -> InterpolationKind {
        InterpolationKind::Linear
    }

    fn start_value(&self) -> f64 {
        self.start
    }

    fn end_value(&self) -> f64 {
        self.end
    }

    fn value(&self, t: f64) -> f64 {
        self.start + self.delta() * clamp_unit(t)
    }

    fn value_lower_bound(&self) -> f64 {
        self.start.min(self.end)
    }

    fn value_upper_bound(&self) -> f64 {
        self.start.max(self.end)
    }

    fn velocity_bound(&self, _window: Interval) -> f64 {
        self.delta().abs()
    }

    fn movement_length_bound(&self, window: Interval) -> f64 {
        let (a, b) = clamp_window(window);
        self.delta().abs() * (b - a)
    }
}
