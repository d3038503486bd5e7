// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_chain::LinkBoundCache;
use sweep_math::{Mat3, Transform, Vec3};

/// Mutable query state of one motion: the last integrated time and pose,
/// plus the chain-bound cache articulated motions reuse between queries.
///
/// Valid only for the motion that filled it. [`crate::Motion::integrate`]
/// overwrites it wholesale; nothing is updated incrementally.
#[derive(Debug, Clone, Default)]
pub struct MotionCache {
    pub(crate) time: f64,
    pub(crate) transform: Transform,
    pub(crate) chain: LinkBoundCache,
}

impl MotionCache {
    /// Time of the last integration.
    pub fn current_time(&self) -> f64 {
        self.time
    }

    /// Pose at [`MotionCache::current_time`].
    pub fn current_transform(&self) -> Transform {
        self.transform
    }

    /// Rotation of the current pose.
    pub fn current_rotation(&self) -> Mat3 {
        self.transform.rotation_matrix()
    }

    /// Translation of the current pose.
    pub fn current_translation(&self) -> Vec3 {
        self.transform.translation()
    }

    /// Chain-bound cache used by articulated motions.
    pub fn chain_cache(&self) -> &LinkBoundCache {
        &self.chain
    }
}
