// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt::Debug;

use sweep_taylor::Interval;

use crate::data::InterpolationKind;

/// A scalar curve from `start_value()` at `t = 0` to `end_value()` at `t = 1`.
///
/// Times outside `[0, 1]` are clamped. All bounds are conservative: they may
/// over-approximate but never under-approximate the true quantity.
pub trait Interpolation: Debug + Send + Sync {
    /// Type tag of this curve.
    fn kind(&self) -> InterpolationKind;

    /// Value at `t = 0`.
    fn start_value(&self) -> f64;

    /// Value at `t = 1`.
    fn end_value(&self) -> f64;

    /// Value at normalized time `t`.
    fn value(&self, t: f64) -> f64;

    /// Smallest value the curve takes on `[0, 1]`.
    fn value_lower_bound(&self) -> f64;

    /// Largest value the curve takes on `[0, 1]`.
    fn value_upper_bound(&self) -> f64;

    /// Bound on `|d value / dt|` for `t` in `window`.
    fn velocity_bound(&self, window: Interval) -> f64;

    /// Bound on `|value(t) - value(window.lo())|` for `t` in `window`.
    fn movement_length_bound(&self, window: Interval) -> f64;
}

/// Clamps a window into `[0, 1]`.
pub(crate) fn clamp_window(window: Interval) -> (f64, f64) {
    (
        sweep_math::clamp_unit(window.lo()),
        sweep_math::clamp_unit(window.hi()),
    )
}
