// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::{Quat, Transform, Vec3, EPSILON};
use sweep_taylor::{Interval, TaylorMatrix, TaylorModel, TaylorVector};
use tracing::debug;

use crate::settings::MotionSettings;

/// Rotation taking `from` to `to`, as a unit axis and an angle in `[0, π]`.
///
/// The quaternion is flipped onto the `w ≥ 0` hemisphere first, so the
/// shorter of the two equivalent arcs is returned.
pub(crate) fn relative_rotation(from: &Quat, to: &Quat) -> (Vec3, f64) {
    let delta = to.multiply(&from.conjugate()).normalize();
    let delta = if delta.scalar() < 0.0 {
        let [x, y, z, w] = delta.to_array();
        Quat::new(-x, -y, -z, -w)
    } else {
        delta
    };
    delta.to_axis_angle()
}

/// Taylor model of the rotation by `angular_vel · t` about the unit `axis`.
pub(crate) fn delta_rotation_model(axis: &Vec3, angular_vel: f64, time: Interval) -> TaylorMatrix {
    let sin = TaylorModel::sin_of_linear(angular_vel, 0.0, time);
    let cos = TaylorModel::cos_of_linear(angular_vel, 0.0, time);
    TaylorMatrix::rodrigues(axis, &sin, &cos)
}

/// Screw motion: rotation about a fixed axis at constant angular speed,
/// combined with translation along that axis at constant speed.
///
/// Parameters are derived once from the two end poses. When the relative
/// rotation is below [`MotionSettings::degenerate_angle`] the motion is a
/// pure translation along `T₂ − T₁`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrewMotion {
    start: Transform,
    end: Transform,
    axis: Vec3,
    axis_origin: Vec3,
    linear_vel: f64,
    angular_vel: f64,
}

impl ScrewMotion {
    /// Screw motion between two poses with default settings.
    pub fn new(start: Transform, end: Transform) -> Self {
        Self::with_settings(start, end, &MotionSettings::default())
    }

    /// Screw motion between two poses.
    pub fn with_settings(start: Transform, end: Transform, settings: &MotionSettings) -> Self {
        let (axis, angle) = relative_rotation(&start.rotation(), &end.rotation());
        let t1 = start.translation();
        let t2 = end.translation();
        let offset = t2.sub(&t1);

        // A zero threshold would leave `cot_half` infinite for identical rotations.
        if angle < settings.degenerate_angle.max(EPSILON) {
            let length = offset.length();
            let axis = if length > EPSILON {
                offset.scale(1.0 / length)
            } else {
                Vec3::UNIT_X
            };
            debug!(angle, length, "screw motion degenerates to translation");
            return Self {
                start,
                end,
                axis,
                axis_origin: t1,
                linear_vel: if length > EPSILON { length } else { 0.0 },
                angular_vel: 0.0,
            };
        }

        // Point on the screw axis closest to the chord midpoint.
        let cot_half = 1.0 / (angle * 0.5).tan();
        let axis_origin = t1.add(&t2).add(&axis.cross(&offset).scale(cot_half)).scale(0.5);
        let linear_vel = offset.dot(&axis);
        debug!(angle, linear_vel, "screw motion built");
        Self {
            start,
            end,
            axis,
            axis_origin,
            linear_vel,
            angular_vel: angle,
        }
    }

    /// Pose at `t = 0`.
    pub fn start_transform(&self) -> Transform {
        self.start
    }

    /// Pose at `t = 1`.
    pub fn end_transform(&self) -> Transform {
        self.end
    }

    /// Unit screw axis.
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// A point on the screw axis.
    pub fn axis_origin(&self) -> Vec3 {
        self.axis_origin
    }

    /// Signed speed along the axis.
    pub fn linear_velocity(&self) -> f64 {
        self.linear_vel
    }

    /// Angular speed about the axis; never negative.
    pub fn angular_velocity(&self) -> f64 {
        self.angular_vel
    }

    fn delta_rotation(&self, t: f64) -> Quat {
        Quat::from_axis_angle(self.axis, t * self.angular_vel)
    }

    /// Pose at normalized time `t` (clamped).
    pub fn transform_at(&self, t: f64) -> Transform {
        let t = sweep_math::clamp_unit(t);
        let delta = self.delta_rotation(t);
        let rotation = delta.multiply(&self.start.rotation());
        let arm = self.start.translation().sub(&self.axis_origin);
        let translation = self
            .axis_origin
            .add(&self.axis.scale(t * self.linear_vel))
            .add(&delta.rotate(&arm));
        Transform::new(rotation, translation)
    }

    /// Rotation and translation as Taylor models over `time`.
    pub fn taylor_model(&self, time: Interval) -> (TaylorMatrix, TaylorVector) {
        let delta_r = delta_rotation_model(&self.axis, self.angular_vel, time);
        let slide: [TaylorModel; 3] = core::array::from_fn(|i| {
            TaylorModel::linear(0.0, self.linear_vel * self.axis.get(i), time)
        });
        let delta_t = TaylorVector::constant(&self.axis_origin, time)
            .sub(&delta_r.mul_vec3(&self.axis_origin))
            .add(&TaylorVector::from_models(slide[0], slide[1], slide[2]));

        let rotation = delta_r.mul_mat3(&self.start.rotation_matrix());
        let translation = delta_r.mul_vec3(&self.start.translation()).add(&delta_t);
        (rotation, translation)
    }

    /// Bound on `|v · n|` over the rest of the motion for points whose
    /// current world positions are `points`; on `|v|` without a direction.
    ///
    /// Rotation about the axis keeps each point's distance to the axis, so
    /// the current distances bound the whole motion.
    pub(crate) fn rate_bound(
        &self,
        points: impl IntoIterator<Item = Vec3>,
        direction: Option<&Vec3>,
    ) -> f64 {
        let max_radius = points
            .into_iter()
            .map(|p| {
                let rel = p.sub(&self.axis_origin);
                rel.sub(&self.axis.scale(rel.dot(&self.axis))).length()
            })
            .fold(0.0, f64::max);
        let (along, across) = direction.map_or((1.0, 1.0), |n| {
            (self.axis.dot(n).abs(), n.cross(&self.axis).length())
        });
        self.linear_vel.abs() * along + self.angular_vel * across * max_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn identical_poses_do_not_move() {
        let tf = Transform::new(
            Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.7),
            Vec3::new(1.0, -2.0, 0.5),
        );
        let screw = ScrewMotion::new(tf, tf);
        assert_eq!(screw.angular_velocity(), 0.0);
        assert_eq!(screw.linear_velocity(), 0.0);
        for t in [0.0, 0.3, 0.5, 1.0] {
            assert!(screw.transform_at(t).approx_eq(&tf, 1e-12));
        }
    }

    #[test]
    fn pure_translation_moves_along_offset() {
        let a = Transform::from_translation(Vec3::new(1.0, 1.0, 1.0));
        let b = Transform::from_translation(Vec3::new(1.0, 4.0, 5.0));
        let screw = ScrewMotion::new(a, b);
        assert_eq!(screw.angular_velocity(), 0.0);
        assert!((screw.linear_velocity() - 5.0).abs() < 1e-12);
        let mid = screw.transform_at(0.5).translation();
        assert!(mid.sub(&Vec3::new(1.0, 2.5, 3.0)).length() < 1e-12);
    }

    #[test]
    fn zero_threshold_still_treats_equal_rotations_as_translation() {
        let settings = MotionSettings {
            degenerate_angle: 0.0,
            ..MotionSettings::default()
        };
        let a = Transform::from_translation(Vec3::new(0.0, 0.0, 0.0));
        let b = Transform::from_translation(Vec3::new(2.0, 0.0, 0.0));
        let screw = ScrewMotion::with_settings(a, b, &settings);
        assert_eq!(screw.angular_velocity(), 0.0);
        let end = screw.transform_at(1.0).translation();
        assert!(end.is_finite());
        assert!(end.sub(&Vec3::new(2.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn quarter_turn_about_offset_axis() {
        // Rotating a body at (1, 0, 0) a quarter turn about the Z axis
        // through the origin lands it at (0, 1, 0).
        let a = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let b = Transform::new(
            Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let screw = ScrewMotion::new(a, b);
        assert!((screw.angular_velocity() - FRAC_PI_2).abs() < 1e-12);
        assert!(screw.axis().sub(&Vec3::UNIT_Z).length() < 1e-12);
        assert!(screw.axis_origin().length() < 1e-12);
        assert!(screw.linear_velocity().abs() < 1e-12);
        assert!(screw.transform_at(1.0).approx_eq(&b, 1e-12));
        let half = FRAC_PI_2 * 0.5;
        let mid = screw.transform_at(0.5).translation();
        assert!(mid.sub(&Vec3::new(half.cos(), half.sin(), 0.0)).length() < 1e-12);
    }

    #[test]
    fn relative_rotation_takes_short_arc() {
        let from = Quat::identity();
        let to = Quat::from_axis_angle(Vec3::UNIT_Y, 1.5 * core::f64::consts::PI);
        let (axis, angle) = relative_rotation(&from, &to);
        assert!((angle - FRAC_PI_2).abs() < 1e-12);
        assert!(axis.add(&Vec3::UNIT_Y).length() < 1e-12);
    }
}
