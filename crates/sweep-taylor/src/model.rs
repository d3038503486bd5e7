// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::f64::consts::FRAC_PI_2;

use crate::interval::Interval;

/// Number of polynomial coefficients carried by a model (degree ≤ 3).
pub const ORDER: usize = 4;

/// Scalar Taylor model: `f(t) ∈ Σ cₖ tᵏ + remainder` for all `t ∈ time`.
///
/// Coefficients are expressed in the absolute time variable, not in an
/// offset from the interval midpoint, so models over the same `time` can be
/// combined coefficient-wise.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaylorModel {
    coeffs: [f64; ORDER],
    remainder: Interval,
    time: Interval,
}

impl TaylorModel {
    /// The zero model over `time`.
    pub fn zero(time: Interval) -> Self {
        Self {
            coeffs: [0.0; ORDER],
            remainder: Interval::ZERO,
            time,
        }
    }

    /// Builds a model from explicit parts.
    pub fn from_parts(coeffs: [f64; ORDER], remainder: Interval, time: Interval) -> Self {
        Self {
            coeffs,
            remainder,
            time,
        }
    }

    /// The constant function `c` (exact).
    pub fn constant(c: f64, time: Interval) -> Self {
        Self::from_parts([c, 0.0, 0.0, 0.0], Interval::ZERO, time)
    }

    /// The linear function `a + b·t` (exact).
    pub fn linear(a: f64, b: f64, time: Interval) -> Self {
        Self::from_parts([a, b, 0.0, 0.0], Interval::ZERO, time)
    }

    /// Model of `cos(w·t + q0)` over `time`.
    ///
    /// Degree-3 expansion around the interval midpoint; the remainder is the
    /// Lagrange bound `|w|⁴ r⁴ / 24` with `r` the half-width of `time`.
    pub fn cos_of_linear(w: f64, q0: f64, time: Interval) -> Self {
        Self::trig_of_linear(w, q0, time, f64::cos)
    }

    /// Model of `sin(w·t + q0)` over `time`. Same construction as
    /// [`TaylorModel::cos_of_linear`].
    pub fn sin_of_linear(w: f64, q0: f64, time: Interval) -> Self {
        Self::trig_of_linear(w, q0, time, f64::sin)
    }

    fn trig_of_linear(w: f64, q0: f64, time: Interval, f: fn(f64) -> f64) -> Self {
        let tm = time.center();
        let r = time.radius();
        let phase = w * tm + q0;

        // k-th derivative of f(w t + q0) is w^k f(phase + k π/2) for f ∈ {sin, cos}.
        let mut local = [0.0; ORDER];
        let mut w_pow = 1.0;
        let mut fact = 1.0;
        for (k, d) in local.iter_mut().enumerate() {
            if k > 0 {
                w_pow *= w;
                fact *= k as f64;
            }
            *d = w_pow * f(phase + k as f64 * FRAC_PI_2) / fact;
        }

        let w4 = w.abs().powi(4);
        let bound = w4 * r.powi(4) / 24.0;
        Self::from_parts(shift_to_absolute(&local, tm), Interval::symmetric(bound), time)
    }

    /// Coefficient of `tᵏ`.
    pub fn coeff(&self, k: usize) -> f64 {
        self.coeffs[k]
    }

    /// All coefficients, lowest degree first.
    pub fn coeffs(&self) -> [f64; ORDER] {
        self.coeffs
    }

    /// Remainder interval.
    pub fn remainder(&self) -> Interval {
        self.remainder
    }

    /// Declared time interval.
    pub fn time(&self) -> Interval {
        self.time
    }

    /// Returns the same model with the remainder hulled with `extra`.
    ///
    /// Hulling can only widen the remainder, so soundness is preserved.
    pub fn widen_remainder(&self, extra: &Interval) -> Self {
        Self {
            remainder: self.remainder.hull(extra),
            ..*self
        }
    }

    /// Evaluates the polynomial part at `t` (Horner).
    pub fn evaluate(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    /// Enclosure of the modelled function at a single `t`.
    pub fn enclose(&self, t: f64) -> Interval {
        self.remainder.offset(self.evaluate(t))
    }

    /// Enclosure of the modelled function over the whole time interval.
    pub fn bound(&self) -> Interval {
        polynomial_bound(&self.coeffs, &self.time).add(&self.remainder)
    }

    /// Enclosure of the polynomial part alone over the time interval.
    pub fn polynomial_bound(&self) -> Interval {
        polynomial_bound(&self.coeffs, &self.time)
    }

    /// Sum of two models over the same time interval.
    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.time, other.time, "time interval mismatch");
        let mut coeffs = self.coeffs;
        for (c, o) in coeffs.iter_mut().zip(other.coeffs.iter()) {
            *c += o;
        }
        Self::from_parts(coeffs, self.remainder.add(&other.remainder), self.time)
    }

    /// Difference of two models over the same time interval.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Negated model.
    pub fn neg(&self) -> Self {
        self.scale(-1.0)
    }

    /// Model scaled by a constant.
    pub fn scale(&self, s: f64) -> Self {
        Self::from_parts(
            self.coeffs.map(|c| c * s),
            self.remainder.scale(s),
            self.time,
        )
    }

    /// Model shifted by a constant.
    pub fn add_scalar(&self, c: f64) -> Self {
        let mut coeffs = self.coeffs;
        coeffs[0] += c;
        Self::from_parts(coeffs, self.remainder, self.time)
    }

    /// Product of two models over the same time interval.
    ///
    /// Terms of degree 4..6 are bounded over the time interval and moved into
    /// the remainder, together with the cross terms `P₁R₂ + P₂R₁ + R₁R₂`.
    pub fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.time, other.time, "time interval mismatch");
        let mut full = [0.0; 2 * ORDER - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                full[i + j] += a * b;
            }
        }

        let mut coeffs = [0.0; ORDER];
        coeffs.copy_from_slice(&full[..ORDER]);

        let mut high = Interval::ZERO;
        for (k, c) in full.iter().enumerate().skip(ORDER) {
            let k = u32::try_from(k).unwrap_or(u32::MAX);
            high = high.add(&self.time.pow(k).scale(*c));
        }

        let p1 = self.polynomial_bound();
        let p2 = other.polynomial_bound();
        let remainder = high
            .add(&p1.mul(&other.remainder))
            .add(&p2.mul(&self.remainder))
            .add(&self.remainder.mul(&other.remainder));

        Self::from_parts(coeffs, remainder, self.time)
    }
}

/// Enclosure of `Σ cₖ tᵏ` for `t ∈ time`, term by term.
fn polynomial_bound(coeffs: &[f64; ORDER], time: &Interval) -> Interval {
    coeffs
        .iter()
        .enumerate()
        .fold(Interval::ZERO, |acc, (k, c)| {
            let k = u32::try_from(k).unwrap_or(u32::MAX);
            acc.add(&time.pow(k).scale(*c))
        })
}

/// Re-expresses `Σ dₖ (t − tm)ᵏ` as `Σ cⱼ tʲ`.
fn shift_to_absolute(local: &[f64; ORDER], tm: f64) -> [f64; ORDER] {
    const BINOMIAL: [[f64; ORDER]; ORDER] = [
        [1.0, 0.0, 0.0, 0.0],
        [1.0, 1.0, 0.0, 0.0],
        [1.0, 2.0, 1.0, 0.0],
        [1.0, 3.0, 3.0, 1.0],
    ];
    let mut out = [0.0; ORDER];
    for (k, d) in local.iter().enumerate() {
        for (j, c) in out.iter_mut().enumerate().take(k + 1) {
            let e = i32::try_from(k - j).unwrap_or(0);
            *c += d * BINOMIAL[k][j] * (-tm).powi(e);
        }
    }
    out
}
