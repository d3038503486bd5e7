// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_chain::LinkBound;
use sweep_math::{Transform, Vec3};

use crate::cache::MotionCache;
use crate::error::MotionError;

/// Motion of a body rigidly attached to one link of an articulated model.
///
/// Poses come from the chain's forward kinematics. `reference_point` places
/// the body origin in the link frame, whose origin is the centre of the
/// link's parent joint.
#[derive(Debug, Clone)]
pub struct ArticularMotion {
    link_bound: LinkBound,
    reference_point: Vec3,
}

impl ArticularMotion {
    /// Body placed at the link frame origin.
    pub fn new(link_bound: LinkBound) -> Self {
        Self {
            link_bound,
            reference_point: Vec3::ZERO,
        }
    }

    /// Chain accumulator driving this motion.
    pub fn link_bound(&self) -> &LinkBound {
        &self.link_bound
    }

    /// Body origin in the link frame.
    pub fn reference_point(&self) -> Vec3 {
        self.reference_point
    }

    /// Moves the body origin within the link frame.
    pub fn set_reference_point(&mut self, reference_point: Vec3) {
        self.reference_point = reference_point;
    }

    fn link_name(&self) -> String {
        self.link_bound
            .model()
            .link(self.link_bound.link())
            .name()
            .to_owned()
    }

    /// Body pose at normalized time `t` (clamped).
    ///
    /// # Errors
    /// [`MotionError::NoParentJoint`] if the link is the model root.
    pub fn transform_at(&self, t: f64) -> Result<Transform, MotionError> {
        if self.link_bound.last_joint().is_none() {
            return Err(MotionError::NoParentJoint(self.link_name()));
        }
        let link = self.link_bound.global_transform(sweep_math::clamp_unit(t));
        Ok(link.compose(&Transform::from_translation(self.reference_point)))
    }

    /// Bound on the speed along `direction` of body points within
    /// `max_distance` of the joint centre, from the cached time to `1`.
    ///
    /// A zero or sub-`EPSILON` `direction` gives the non-directional bound.
    pub fn motion_bound(
        &self,
        cache: &mut MotionCache,
        direction: &Vec3,
        max_distance: f64,
    ) -> Result<f64, MotionError> {
        Ok(self.link_bound.motion_bound(
            &mut cache.chain,
            cache.time,
            1.0,
            direction,
            max_distance,
        )?)
    }

    /// [`ArticularMotion::motion_bound`] without a direction.
    pub fn non_directional_motion_bound(
        &self,
        cache: &mut MotionCache,
        max_distance: f64,
    ) -> Result<f64, MotionError> {
        self.motion_bound(cache, &Vec3::ZERO, max_distance)
    }

    /// Largest distance from the joint centre of body-frame `points`.
    pub(crate) fn reach(&self, points: impl IntoIterator<Item = Vec3>) -> f64 {
        points
            .into_iter()
            .map(|x| x.add(&self.reference_point).length())
            .fold(0.0, f64::max)
    }
}
