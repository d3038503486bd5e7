// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::{Mat3, Quat, Transform, Vec3, EPSILON};
use sweep_taylor::{Interval, TaylorMatrix, TaylorModel, TaylorVector};
use tracing::debug;

use crate::settings::MotionSettings;

/// Uniform cubic B-spline basis weights at `t`.
fn basis(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    let u = 1.0 - t;
    [
        u * u * u / 6.0,
        (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0,
        (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0,
        t3 / 6.0,
    ]
}

fn blend(points: &[Vec3; 4], w: [f64; 4]) -> Vec3 {
    points
        .iter()
        .zip(w)
        .fold(Vec3::ZERO, |acc, (p, w)| acc.add(&p.scale(w)))
}

/// Exponential map of a rotation vector; identity near zero.
fn exp_map(r: &Vec3) -> Quat {
    let angle = r.length();
    if angle < EPSILON {
        Quat::identity()
    } else {
        Quat::from_axis_angle(r.scale(1.0 / angle), angle)
    }
}

/// Spline motion: translation and rotation vector each follow a uniform
/// cubic B-spline over four control points.
///
/// The rotation at `t` is the exponential map of the blended rotation
/// vector. The curve does not pass through its control points, so the
/// start and end poses are the evaluated curve ends.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineMotion {
    td: [Vec3; 4],
    rd: [Vec3; 4],
    rotation_remainder: f64,
}

impl SplineMotion {
    /// Spline over translation control points `td` and rotation-vector
    /// control points `rd`, with default settings.
    pub fn new(td: [Vec3; 4], rd: [Vec3; 4]) -> Self {
        Self::with_settings(td, rd, &MotionSettings::default())
    }

    /// Spline with an explicit rotation remainder half-width.
    pub fn with_settings(td: [Vec3; 4], rd: [Vec3; 4], settings: &MotionSettings) -> Self {
        debug!(
            remainder = settings.spline_rotation_remainder,
            "spline motion built"
        );
        Self {
            td,
            rd,
            rotation_remainder: settings.spline_rotation_remainder,
        }
    }

    /// Translation control points.
    pub fn translation_points(&self) -> &[Vec3; 4] {
        &self.td
    }

    /// Rotation-vector control points.
    pub fn rotation_points(&self) -> &[Vec3; 4] {
        &self.rd
    }

    /// Pose at normalized time `t` (clamped).
    pub fn transform_at(&self, t: f64) -> Transform {
        let w = basis(sweep_math::clamp_unit(t));
        Transform::new(exp_map(&blend(&self.rd, w)), blend(&self.td, w))
    }

    /// Pose at `t = 0`.
    pub fn start_transform(&self) -> Transform {
        self.transform_at(0.0)
    }

    /// Pose at `t = 1`.
    pub fn end_transform(&self) -> Transform {
        self.transform_at(1.0)
    }

    /// Power-basis coefficients `[c0, c1, c2, c3]` of the translation curve.
    pub fn translation_coefficients(&self) -> [Vec3; 4] {
        let [d0, d1, d2, d3] = self.td;
        [
            d0.add(&d1.scale(4.0)).add(&d2).scale(1.0 / 6.0),
            d2.sub(&d0).scale(0.5),
            d0.sub(&d1.scale(2.0)).add(&d2).scale(0.5),
            d3.sub(&d0)
                .add(&d1.scale(3.0))
                .sub(&d2.scale(3.0))
                .scale(1.0 / 6.0),
        ]
    }

    /// Bound on `|T'(t) · n|` over the whole motion.
    ///
    /// The derivative is a convex blend of consecutive control-point
    /// differences.
    pub fn translation_bound(&self, n: &Vec3) -> f64 {
        self.td
            .windows(2)
            .map(|w| w[1].sub(&w[0]).dot(n).abs())
            .fold(0.0, f64::max)
    }

    /// Bound on the angular speed over the whole motion.
    pub fn angular_speed_bound(&self) -> f64 {
        self.rd
            .windows(2)
            .map(|w| w[1].sub(&w[0]).length())
            .fold(0.0, f64::max)
    }

    /// Bound on `|v · n|` for body-frame `points`; on `|v|` without a
    /// direction.
    pub(crate) fn rate_bound(
        &self,
        points: impl IntoIterator<Item = Vec3>,
        direction: Option<&Vec3>,
    ) -> f64 {
        let max_arm = points
            .into_iter()
            .map(|x| x.length())
            .fold(0.0, f64::max);
        let along = direction.map_or_else(
            || {
                self.td
                    .windows(2)
                    .map(|w| w[1].sub(&w[0]).length())
                    .fold(0.0, f64::max)
            },
            |n| self.translation_bound(n),
        );
        along + self.angular_speed_bound() * max_arm
    }

    /// Rotation and translation as Taylor models over `time`.
    ///
    /// Translation is exact. Rotation is the second-order expansion of the
    /// exponential map around `t = 0.5`; each entry's remainder is the
    /// configured half-width hulled with the range every rotation entry
    /// must stay in.
    pub fn taylor_model(&self, time: Interval) -> (TaylorMatrix, TaylorVector) {
        let c = self.translation_coefficients();
        let axis_model =
            |i: usize| TaylorModel::from_parts(c.map(|v| v.get(i)), Interval::ZERO, time);
        let translation = TaylorVector::from_models(axis_model(0), axis_model(1), axis_model(2));
        (self.rotation_model(time), translation)
    }

    fn rotation_model(&self, time: Interval) -> TaylorMatrix {
        let [r0, r1, r2, r3] = self.rd;
        let r = r0
            .add(&r1.scale(23.0))
            .add(&r2.scale(23.0))
            .add(&r3)
            .scale(1.0 / 48.0);
        let dr = r2
            .sub(&r1)
            .scale(5.0)
            .add(&r3)
            .sub(&r0)
            .scale(1.0 / 8.0);
        let ddr = r0.sub(&r1).sub(&r2).add(&r3).scale(0.5);

        let theta = r.length();
        let slack = Interval::symmetric(self.rotation_remainder);
        if theta < EPSILON {
            return TaylorMatrix::identity(time).map(|m| guarded(m, &slack));
        }

        let (m0, m1, m2) = exp_map_derivatives(&r, &dr, &ddr);
        TaylorMatrix::constant(&m0.sub(&m1.scale(0.5)).add(&m2.scale(0.125)), time)
            .add(&TaylorMatrix::scaled(
                &m1.sub(&m2.scale(0.5)),
                &TaylorModel::linear(0.0, 1.0, time),
            ))
            .add(&TaylorMatrix::scaled(
                &m2.scale(0.5),
                &TaylorModel::from_parts([0.0, 0.0, 1.0, 0.0], Interval::ZERO, time),
            ))
            .map(|m| guarded(m, &slack))
    }
}

/// Widens the remainder by `slack` and by the gap between the polynomial
/// range and `[-1, 1]`, so the true entry is enclosed whatever the
/// truncation error is.
fn guarded(model: &TaylorModel, slack: &Interval) -> TaylorModel {
    let p = model.polynomial_bound();
    let guard = Interval::new(-1.0 - p.hi(), 1.0 - p.lo());
    model.widen_remainder(slack).widen_remainder(&guard)
}

/// `M(t) = exp(hat(r(t)))` and its first two time derivatives, given `r`,
/// `r'` and `r''` at one instant. `r` must be non-zero.
fn exp_map_derivatives(r: &Vec3, dr: &Vec3, ddr: &Vec3) -> (Mat3, Mat3, Mat3) {
    let theta = r.length();
    let theta3 = theta * theta * theta;
    let theta5 = theta3 * theta * theta;
    let r_dr = r.dot(dr);
    let curvature = r.dot(ddr) + dr.dot(dr);

    let d_theta = r_dr / theta;
    let dd_theta = curvature / theta - r_dr * r_dr / theta3;

    let w = r.scale(1.0 / theta);
    let dw = dr.scale(1.0 / theta).sub(&r.scale(r_dr / theta3));
    let ddw = ddr
        .scale(1.0 / theta)
        .sub(&dr.scale(2.0 * r_dr / theta3))
        .sub(&r.scale(curvature / theta3))
        .add(&r.scale(3.0 * r_dr * r_dr / theta5));

    let k = Mat3::hat(&w);
    let dk = Mat3::hat(&dw);
    let ddk = Mat3::hat(&ddw);
    let k2 = k.multiply(&k);
    let dk_k = dk.multiply(&k).add(&k.multiply(&dk));
    let ddk_k = ddk
        .multiply(&k)
        .add(&dk.multiply(&dk).scale(2.0))
        .add(&k.multiply(&ddk));

    let (s, c) = theta.sin_cos();
    let m0 = Mat3::identity().add(&k.scale(s)).add(&k2.scale(1.0 - c));
    let m1 = k
        .scale(c * d_theta)
        .add(&dk.scale(s))
        .add(&k2.scale(s * d_theta))
        .add(&dk_k.scale(1.0 - c));
    let m2 = k
        .scale(-s * d_theta * d_theta + c * dd_theta)
        .add(&dk.scale(2.0 * c * d_theta))
        .add(&ddk.scale(s))
        .add(&k2.scale(c * d_theta * d_theta + s * dd_theta))
        .add(&dk_k.scale(2.0 * s * d_theta))
        .add(&ddk_k.scale(1.0 - c));
    (m0, m1, m2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SplineMotion {
        SplineMotion::new(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.5, 0.0),
                Vec3::new(2.0, 0.0, 1.0),
                Vec3::new(3.0, -1.0, 1.0),
            ],
            [
                Vec3::new(0.0, 0.0, 0.1),
                Vec3::new(0.0, 0.2, 0.3),
                Vec3::new(0.1, 0.3, 0.6),
                Vec3::new(0.2, 0.3, 0.9),
            ],
        )
    }

    #[test]
    fn basis_is_a_partition_of_unity() {
        for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
            let sum: f64 = basis(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn coefficients_reproduce_the_curve() {
        let spline = sample();
        let c = spline.translation_coefficients();
        for t in [0.0, 0.3, 0.5, 0.8, 1.0] {
            let poly = c[0]
                .add(&c[1].scale(t))
                .add(&c[2].scale(t * t))
                .add(&c[3].scale(t * t * t));
            let direct = spline.transform_at(t).translation();
            assert!(poly.sub(&direct).length() < 1e-12, "t = {t}");
        }
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let r = Vec3::new(0.3, -0.2, 0.5);
        let dr = Vec3::new(0.1, 0.4, -0.2);
        let ddr = Vec3::new(-0.3, 0.1, 0.2);
        let at = |h: f64| {
            let rh = r.add(&dr.scale(h)).add(&ddr.scale(0.5 * h * h));
            exp_map(&rh).to_mat3()
        };
        let (m0, m1, m2) = exp_map_derivatives(&r, &dr, &ddr);
        let h = 1e-4;
        let fd1 = at(h).sub(&at(-h)).scale(0.5 / h);
        let fd2 = at(h).sub(&m0.scale(2.0)).add(&at(-h)).scale(1.0 / (h * h));
        for i in 0..3 {
            for j in 0..3 {
                assert!((m0.at(i, j) - at(0.0).at(i, j)).abs() < 1e-12);
                assert!((m1.at(i, j) - fd1.at(i, j)).abs() < 1e-6);
                assert!((m2.at(i, j) - fd2.at(i, j)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn zero_rotation_uses_guarded_identity() {
        let spline = SplineMotion::new([Vec3::ZERO; 4], [Vec3::ZERO; 4]);
        let (rotation, _) = spline.taylor_model(Interval::UNIT);
        let bounds = rotation.bound();
        for (i, row) in bounds.iter().enumerate() {
            for (j, b) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(b.contains(expected));
            }
        }
    }
}
