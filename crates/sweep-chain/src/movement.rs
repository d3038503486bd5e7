// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt::Debug;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use sweep_interp::{Interpolation, InterpolationData, InterpolationFactory};
use sweep_math::{Transform, Vec3};
use tracing::debug;

use crate::config::ModelConfig;
use crate::error::ChainError;
use crate::model::{JointId, JointKind, LinkId, Model};
use crate::window::TimeWindow;

/// Per-joint velocity bounds and forward kinematics of a moving model.
///
/// All velocities are per normalized time unit and expressed in the joint's
/// parent link frame. Implementations must over-approximate: for every `t`
/// in the window the true velocity has to lie within the reported bound.
pub trait VelocityBounds: Debug + Send + Sync {
    /// Bound on the linear velocity of `joint`'s frame; the components give
    /// the direction along which the joint translates.
    fn linear_velocity_bound(&self, joint: JointId, window: TimeWindow) -> Vec3;

    /// Bound on the speed of `joint`'s frame, at least the length of
    /// [`VelocityBounds::linear_velocity_bound`].
    fn absolute_linear_velocity_bound(&self, joint: JointId, window: TimeWindow) -> f64 {
        self.linear_velocity_bound(joint, window).length()
    }

    /// Bound on the angular velocity `joint` contributes, as an axis scaled
    /// by the speed bound.
    fn angular_velocity_bound(&self, joint: JointId, window: TimeWindow) -> Vec3;

    /// Bound on the distance between the centres of `child` and its ancestor
    /// `parent` over the whole motion.
    fn child_parent_distance_bound(&self, child: JointId, parent: JointId) -> f64;

    /// World pose of `link` at normalized time `t`.
    fn global_transform(&self, link: LinkId, t: f64) -> Transform;
}

/// Joint values interpolated between a start and an end configuration.
///
/// Curves come from an injected [`InterpolationFactory`]; the movement owns
/// one curve per joint and is read-only afterwards.
#[derive(Debug)]
pub struct Movement {
    model: Arc<Model>,
    curves: Vec<Box<dyn Interpolation>>,
}

impl Movement {
    /// Linear interpolation for every joint.
    ///
    /// # Errors
    /// Unknown joint names in either configuration, or a curve the factory
    /// refuses to build.
    pub fn new(
        model: Arc<Model>,
        start: &ModelConfig,
        end: &ModelConfig,
        factory: &InterpolationFactory,
    ) -> Result<Self, ChainError> {
        Self::with_interpolations(model, start, end, &FxHashMap::default(), factory)
    }

    /// Per-joint interpolation data keyed by joint name; unlisted joints
    /// interpolate linearly.
    ///
    /// # Errors
    /// Unknown joint names in the configurations or in `data`, or a curve
    /// the factory refuses to build.
    pub fn with_interpolations(
        model: Arc<Model>,
        start: &ModelConfig,
        end: &ModelConfig,
        data: &FxHashMap<String, InterpolationData>,
        factory: &InterpolationFactory,
    ) -> Result<Self, ChainError> {
        start.validate(&model)?;
        end.validate(&model)?;
        if let Some(name) = data.keys().find(|name| model.joint_by_name(name).is_none()) {
            return Err(ChainError::UnknownJoint(name.clone()));
        }

        let curves = model
            .joints()
            .map(|(_, joint)| {
                let name = joint.name();
                let data = data.get(name).copied().unwrap_or_default();
                factory
                    .create(&data, start.value(name), end.value(name))
                    .map_err(|source| ChainError::Interpolation {
                        joint: name.to_owned(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(joints = curves.len(), "movement built");
        Ok(Self { model, curves })
    }

    /// Model the movement drives.
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Curve driving `joint`.
    pub fn interpolation(&self, joint: JointId) -> &dyn Interpolation {
        self.curves[joint.index()].as_ref()
    }

    /// Value of `joint` at normalized time `t`.
    pub fn joint_value(&self, joint: JointId, t: f64) -> f64 {
        self.interpolation(joint).value(t)
    }

    /// `last` followed by its ancestors, leaf to root.
    pub fn joints_chain_from_last_joint(&self, last: JointId) -> Vec<JointId> {
        self.model.joints_chain_from_last_joint(last)
    }

    fn speed_bound(&self, joint: JointId, window: TimeWindow) -> f64 {
        self.interpolation(joint)
            .velocity_bound(window.to_interval())
    }

    /// Largest displacement a prismatic joint reaches over the motion.
    fn reach(&self, joint: JointId) -> f64 {
        let curve = self.interpolation(joint);
        curve
            .value_lower_bound()
            .abs()
            .max(curve.value_upper_bound().abs())
    }
}

impl VelocityBounds for Movement {
    fn linear_velocity_bound(&self, joint: JointId, window: TimeWindow) -> Vec3 {
        let j = self.model.joint(joint);
        match j.kind() {
            JointKind::Prismatic => j.axis_in_parent().scale(self.speed_bound(joint, window)),
            _ => Vec3::ZERO,
        }
    }

    fn angular_velocity_bound(&self, joint: JointId, window: TimeWindow) -> Vec3 {
        let j = self.model.joint(joint);
        if j.kind().is_rotational() {
            j.axis_in_parent().scale(self.speed_bound(joint, window))
        } else {
            Vec3::ZERO
        }
    }

    fn child_parent_distance_bound(&self, child: JointId, parent: JointId) -> f64 {
        // Triangle inequality over the joint origins between the two centres,
        // plus the travel of every prismatic joint on the way up.
        let mut distance = 0.0;
        let mut joint = child;
        loop {
            distance += self.model.joint(joint).origin().translation().length();
            let Some(up) = self.model.joint_parent(joint) else {
                break;
            };
            if self.model.joint(up).kind() == JointKind::Prismatic {
                distance += self.reach(up);
            }
            if up == parent {
                break;
            }
            joint = up;
        }
        distance
    }

    fn global_transform(&self, link: LinkId, t: f64) -> Transform {
        self.model
            .parent_joint(link)
            .map(|last| self.joints_chain_from_last_joint(last))
            .unwrap_or_default()
            .iter()
            .rev()
            .fold(Transform::identity(), |world, &joint| {
                world.compose(
                    &self
                        .model
                        .joint(joint)
                        .child_transform(self.joint_value(joint, t)),
                )
            })
    }
}
