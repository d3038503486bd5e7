// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::sync::Arc;

use rustc_hash::FxHashMap;
use sweep_math::Vec3;
use tracing::{debug, instrument};

use crate::accumulate::{fold_chain, ChainRates};
use crate::error::ChainError;
use crate::joint_bound_info::JointBoundInfo;
use crate::model::{JointId, Model};
use crate::movement::VelocityBounds;
use crate::window::TimeWindow;

/// Motion bounds for any link of a model, resolved by name.
///
/// Builds a joint → parent-joint map once by walking the link tree, then
/// answers each query in chain depth. Per-joint provider results for the
/// current window are cached in a [`JointBoundInfo`], so repeated queries
/// over one window touch the provider once per joint.
#[derive(Debug, Clone)]
pub struct ModelBound {
    model: Arc<Model>,
    joint_parents: FxHashMap<JointId, JointId>,
    info: JointBoundInfo,
}

impl ModelBound {
    /// Creates the accumulator over `model` with rates from `provider`.
    pub fn new(model: Arc<Model>, provider: Arc<dyn VelocityBounds>) -> Self {
        let mut joint_parents = FxHashMap::default();
        let mut stack = vec![model.root()];
        while let Some(link_id) = stack.pop() {
            let link = model.link(link_id);
            for &joint in link.child_joints() {
                if let Some(parent) = link.parent_joint() {
                    joint_parents.insert(joint, parent);
                }
                stack.push(model.joint(joint).child_link());
            }
        }
        debug!(entries = joint_parents.len(), "joint parent tree built");
        Self {
            model,
            joint_parents,
            info: JointBoundInfo::new(provider),
        }
    }

    /// Model the bounds are computed over.
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Per-joint cache.
    pub fn joint_bound_info(&self) -> &JointBoundInfo {
        &self.info
    }

    /// Drops every cached joint rate and lever arm; call after the provider's
    /// data changes.
    pub fn clear_cache(&mut self) {
        self.info.clear();
    }

    /// Parent joint of `joint` from the prebuilt map.
    pub fn joint_parent(&self, joint: JointId) -> Option<JointId> {
        self.joint_parents.get(&joint).copied()
    }

    /// `last` followed by its ancestors, leaf to root.
    pub fn joints_chain_from_last_joint(&self, last: JointId) -> Vec<JointId> {
        let mut chain = vec![last];
        let mut joint = last;
        while let Some(parent) = self.joint_parent(joint) {
            chain.push(parent);
            joint = parent;
        }
        chain
    }

    /// Bound on the speed of any point of `link_name` within `max_distance`
    /// of its joint centre, over `window`.
    ///
    /// Accepts a window or a single time `t` (the window `[t, 1]`). Returns
    /// `0` for the root link. Direction handling matches
    /// [`crate::LinkBound::motion_bound`].
    ///
    /// # Errors
    /// [`ChainError::UnknownLink`] if no link has that name.
    #[instrument(skip(self, window), level = "trace")]
    pub fn motion_bound(
        &mut self,
        link_name: &str,
        window: impl Into<TimeWindow>,
        direction: &Vec3,
        max_distance: f64,
    ) -> Result<f64, ChainError> {
        let window = window.into();
        let link = self
            .model
            .link_by_name(link_name)
            .ok_or_else(|| ChainError::UnknownLink(link_name.to_owned()))?;
        let Some(last) = self.model.parent_joint(link) else {
            return Ok(0.0);
        };
        let chain = self.joints_chain_from_last_joint(last);
        let direction = direction.try_normalize();
        let mut rates = CachedRates {
            model: &self.model,
            joint_parents: &self.joint_parents,
            info: &mut self.info,
        };
        let totals = fold_chain(&chain, &mut rates, window, direction)?;
        Ok(totals.total(max_distance))
    }
}

/// Rates served through the [`JointBoundInfo`] cache.
struct CachedRates<'a> {
    model: &'a Model,
    joint_parents: &'a FxHashMap<JointId, JointId>,
    info: &'a mut JointBoundInfo,
}

impl ChainRates for CachedRates<'_> {
    fn joint_parent(&self, joint: JointId) -> Option<JointId> {
        self.joint_parents.get(&joint).copied()
    }

    fn joint_name(&self, joint: JointId) -> String {
        self.model.joint(joint).name().to_owned()
    }

    fn linear(&mut self, joint: JointId, window: TimeWindow) -> Vec3 {
        self.info.linear_velocity_bound(joint, window)
    }

    fn absolute_linear(&mut self, joint: JointId, window: TimeWindow) -> f64 {
        self.info.absolute_linear_velocity_bound(joint, window)
    }

    fn angular(&mut self, joint: JointId, window: TimeWindow) -> Vec3 {
        self.info.angular_velocity_bound(joint, window)
    }

    fn lever(&mut self, child: JointId, parent: JointId) -> f64 {
        self.info.vector_length_bound(child, parent)
    }
}
