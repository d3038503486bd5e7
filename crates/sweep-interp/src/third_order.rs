// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::clamp_unit;
use sweep_taylor::Interval;

use crate::curve::{clamp_window, Interpolation};
use crate::data::{InterpolationData, InterpolationKind, ThirdOrderLimits};
use crate::error::InterpolationError;
use crate::factory::InterpolationFactory;

/// Cubic ease curve `start + Δ·(3t² − 2t³)` with zero velocity at both ends.
///
/// Peak magnitudes over `[0, 1]` are `1.5|Δ|` (velocity, at `t = ½`),
/// `6|Δ|` (acceleration, at the ends) and `12|Δ|` (jerk, constant).
/// Construction rejects endpoints whose profile would break the declared
/// [`ThirdOrderLimits`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThirdOrderInterpolation {
    start: f64,
    end: f64,
    limits: ThirdOrderLimits,
}

impl ThirdOrderInterpolation {
    /// Creates a third-order curve, checking it against `limits`.
    pub fn new(start: f64, end: f64, limits: ThirdOrderLimits) -> Result<Self, InterpolationError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(InterpolationError::NonFinite { start, end });
        }
        let delta = (end - start).abs();
        let checks = [
            ("velocity", 1.5 * delta, limits.max_velocity),
            ("acceleration", 6.0 * delta, limits.max_acceleration),
            ("jerk", 12.0 * delta, limits.max_jerk),
        ];
        for (quantity, required, limit) in checks {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(InterpolationError::InvalidLimit {
                    quantity,
                    value: limit,
                });
            }
            if required > limit {
                return Err(InterpolationError::LimitExceeded {
                    quantity,
                    required,
                    limit,
                });
            }
        }
        Ok(Self { start, end, limits })
    }

    /// Factory constructor for [`InterpolationKind::ThirdOrder`].
    pub fn create(
        data: &InterpolationData,
        start: f64,
        end: f64,
    ) -> Result<Box<dyn Interpolation>, InterpolationError> {
        match data {
            InterpolationData::ThirdOrder(limits) => Ok(Box::new(Self::new(start, end, *limits)?)),
            other => Err(InterpolationError::KindMismatch {
                expected: InterpolationKind::ThirdOrder,
                found: other.kind(),
            }),
        }
    }

    /// Registers [`ThirdOrderInterpolation::create`] with `factory`.
    pub fn register(factory: &mut InterpolationFactory) {
        factory.register_class(InterpolationKind::ThirdOrder, Self::create);
    }

    /// Limits the curve was validated against.
    pub fn limits(&self) -> ThirdOrderLimits {
        self.limits
    }

    fn delta(&self) -> f64 {
        self.end - self.start
    }

    fn ease(u: f64) -> f64 {
        u * u * (3.0 - 2.0 * u)
    }
}

impl Interpolation for ThirdOrderInterpolation {
    fn kind(&self) -> InterpolationKind {
        InterpolationKind::ThirdOrder
    }

    fn start_value(&self) -> f64 {
        self.start
    }

    fn end_value(&self) -> f64 {
        self.end
    }

    fn value(&self, t: f64) -> f64 {
        self.start + self.delta() * Self::ease(clamp_unit(t))
    }

    fn value_lower_bound(&self) -> f64 {
        self.start.min(self.end)
    }

    fn value_upper_bound(&self) -> f64 {
        self.start.max(self.end)
    }

    fn velocity_bound(&self, window: Interval) -> f64 {
        // v(u) = 6Δ·u(1 − u) peaks at u = ½ and is monotone on either side.
        let (a, b) = clamp_window(window);
        let shape = |u: f64| u * (1.0 - u);
        let peak = if a <= 0.5 && 0.5 <= b {
            0.25
        } else {
            shape(a).max(shape(b))
        };
        6.0 * self.delta().abs() * peak
    }

    fn movement_length_bound(&self, window: Interval) -> f64 {
        // The ease is monotone, so the farthest point is the window end.
        let (a, b) = clamp_window(window);
        (self.value(b) - self.value(a)).abs()
    }
}
