// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// A closed interval `[lo, hi]` of reals.
///
/// Construction orders the endpoints, so `lo <= hi` always holds.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Default for Interval {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Interval {
    /// The degenerate interval `[0, 0]`.
    pub const ZERO: Self = Self { lo: 0.0, hi: 0.0 };

    /// The normalized motion time interval `[0, 1]`.
    pub const UNIT: Self = Self { lo: 0.0, hi: 1.0 };

    /// Creates an interval; endpoints are swapped if given out of order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Point interval `[v, v]`.
    pub const fn point(v: f64) -> Self {
        Self { lo: v, hi: v }
    }

    /// Symmetric interval `[-r, r]` for `r >= 0`.
    pub fn symmetric(r: f64) -> Self {
        Self::new(-r.abs(), r.abs())
    }

    /// Lower endpoint.
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper endpoint.
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// `hi - lo`.
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Midpoint.
    pub fn center(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    /// Half the width.
    pub fn radius(&self) -> f64 {
        0.5 * (self.hi - self.lo)
    }

    /// Largest absolute value contained.
    pub fn abs_max(&self) -> f64 {
        self.lo.abs().max(self.hi.abs())
    }

    /// Returns `true` if `v` lies in the interval.
    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }

    /// Returns `true` if `other` is a subset of this interval.
    pub fn contains_interval(&self, other: &Self) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    /// Interval sum.
    pub fn add(&self, other: &Self) -> Self {
        Self {
            lo: self.lo + other.lo,
            hi: self.hi + other.hi,
        }
    }

    /// Interval difference.
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            lo: self.lo - other.hi,
            hi: self.hi - other.lo,
        }
    }

    /// Negation.
    pub fn neg(&self) -> Self {
        Self {
            lo: -self.hi,
            hi: -self.lo,
        }
    }

    /// Scales by a scalar (endpoints reorder for negative `s`).
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.lo * s, self.hi * s)
    }

    /// Shifts by a scalar.
    pub fn offset(&self, s: f64) -> Self {
        Self {
            lo: self.lo + s,
            hi: self.hi + s,
        }
    }

    /// Interval product.
    pub fn mul(&self, other: &Self) -> Self {
        let p = [
            self.lo * other.lo,
            self.lo * other.hi,
            self.hi * other.lo,
            self.hi * other.hi,
        ];
        Self {
            lo: p.iter().copied().fold(f64::INFINITY, f64::min),
            hi: p.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Smallest interval containing both operands.
    pub fn hull(&self, other: &Self) -> Self {
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Enclosure of `{x^n : x ∈ self}`.
    pub fn pow(&self, n: u32) -> Self {
        let exp = i32::try_from(n).unwrap_or(i32::MAX);
        if n == 0 {
            return Self::point(1.0);
        }
        if n % 2 == 1 {
            return Self::new(self.lo.powi(exp), self.hi.powi(exp));
        }
        let a = self.lo.abs().powi(exp);
        let b = self.hi.abs().powi(exp);
        if self.contains(0.0) {
            Self::new(0.0, a.max(b))
        } else {
            Self::new(a.min(b), a.max(b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_covers_sign_changes() {
        let a = Interval::new(-2.0, 3.0);
        let b = Interval::new(-1.0, 4.0);
        assert_eq!(a.mul(&b), Interval::new(-8.0, 12.0));
    }

    #[test]
    fn even_power_straddling_zero_starts_at_zero() {
        assert_eq!(Interval::new(-2.0, 1.0).pow(2), Interval::new(0.0, 4.0));
        assert_eq!(Interval::new(1.0, 2.0).pow(2), Interval::new(1.0, 4.0));
        assert_eq!(Interval::new(-2.0, 1.0).pow(3), Interval::new(-8.0, 1.0));
    }

    #[test]
    fn new_orders_endpoints() {
        let i = Interval::new(3.0, -1.0);
        assert_eq!((i.lo(), i.hi()), (-1.0, 3.0));
    }
}
