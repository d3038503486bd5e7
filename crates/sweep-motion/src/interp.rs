// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::{Quat, Transform, Vec3};
use sweep_taylor::{Interval, TaylorMatrix, TaylorModel, TaylorVector};
use tracing::debug;

use crate::screw::{delta_rotation_model, relative_rotation};

/// Linear interpolation: constant linear velocity of a reference point and
/// constant angular velocity about it.
///
/// With `p_ref` in the body frame, a body point `x` sits at
/// `R(t)(x − p_ref) + T₁(p_ref) + v·t`, so the reference point travels on a
/// straight line while the body spins around it.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpMotion {
    start: Transform,
    end: Transform,
    reference_point: Vec3,
    linear_vel: Vec3,
    angular_axis: Vec3,
    angular_vel: f64,
}

impl InterpMotion {
    /// Interpolation about the body-frame origin.
    pub fn new(start: Transform, end: Transform) -> Self {
        Self::with_reference_point(start, end, Vec3::ZERO)
    }

    /// Interpolation about `reference_point`, given in the body frame.
    pub fn with_reference_point(start: Transform, end: Transform, reference_point: Vec3) -> Self {
        let linear_vel = end
            .transform_point(&reference_point)
            .sub(&start.transform_point(&reference_point));
        let (angular_axis, angular_vel) = relative_rotation(&start.rotation(), &end.rotation());
        debug!(angular_vel, speed = linear_vel.length(), "interp motion built");
        Self {
            start,
            end,
            reference_point,
            linear_vel,
            angular_axis,
            angular_vel,
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

    /// Rotation centre in the body frame.
    pub fn reference_point(&self) -> Vec3 {
        self.reference_point
    }

    /// Velocity of the reference point.
    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_vel
    }

    /// Unit rotation axis (world frame).
    pub fn angular_axis(&self) -> Vec3 {
        self.angular_axis
    }

    /// Angular speed; never negative.
    pub fn angular_velocity(&self) -> f64 {
        self.angular_vel
    }

    /// Pose at normalized time `t` (clamped).
    pub fn transform_at(&self, t: f64) -> Transform {
        let t = sweep_math::clamp_unit(t);
        let delta = Quat::from_axis_angle(self.angular_axis, t * self.angular_vel);
        let rotation = delta.multiply(&self.start.rotation());
        let translation = self
            .start
            .transform_point(&self.reference_point)
            .add(&self.linear_vel.scale(t))
            .sub(&rotation.rotate(&self.reference_point));
        Transform::new(rotation, translation)
    }

    /// Rotation and translation as Taylor models over `time`.
    pub fn taylor_model(&self, time: Interval) -> (TaylorMatrix, TaylorVector) {
        let delta_r = delta_rotation_model(&self.angular_axis, self.angular_vel, time);
        let drift: [TaylorModel; 3] =
            core::array::from_fn(|i| TaylorModel::linear(0.0, self.linear_vel.get(i), time));
        let rotated_ref = self.start.rotation().rotate(&self.reference_point);

        let rotation = delta_r.mul_mat3(&self.start.rotation_matrix());
        let translation = TaylorVector::from_models(drift[0], drift[1], drift[2])
            .add_vec3(&self.start.transform_point(&self.reference_point))
            .sub(&delta_r.mul_vec3(&rotated_ref));
        (rotation, translation)
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
            .map(|x| x.sub(&self.reference_point).length())
            .fold(0.0, f64::max);
        let (along, across) = direction.map_or((self.linear_vel.length(), 1.0), |n| {
            (self.linear_vel.dot(n).abs(), n.cross(&self.angular_axis).length())
        });
        along + self.angular_vel * across * max_arm
    }
}
