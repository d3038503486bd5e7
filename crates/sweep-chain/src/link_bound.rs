// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::sync::Arc;

use sweep_math::{Transform, Vec3};
use tracing::{debug, instrument};

use crate::accumulate::{fold_chain, ChainRates, ChainTotals};
use crate::error::ChainError;
use crate::model::{JointId, LinkId, Model};
use crate::movement::VelocityBounds;
use crate::window::TimeWindow;

/// Exact-match key of the last query: the bounded link, then window bits and
/// direction bits.
type QueryKey = (LinkId, [u64; 5]);

/// Result cache of one [`LinkBound`] query stream.
///
/// Holds the last `(link, start, end, direction)` query and the chain sums
/// it produced. A repeated query with bit-identical inputs reuses those sums
/// without calling the velocity provider. Equality is exact, so a provider
/// whose data changes between two identical queries yields the stale bound;
/// call [`LinkBoundCache::clear`] after mutating it.
#[derive(Debug, Clone, Default)]
pub struct LinkBoundCache {
    entry: Option<(QueryKey, ChainTotals)>,
}

impl LinkBoundCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the last query.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Returns `true` if a query result is stored.
    pub fn is_warm(&self) -> bool {
        self.entry.is_some()
    }
}

/// Conservative motion bound of one link of a model.
///
/// The ancestor joint chain is derived once at construction and stored leaf
/// to root. Queries skip the root joint and add, for each joint `j` with
/// parent `p`, the speed of `p`'s frame plus the angular speed accumulated so
/// far times the `j`–`p` lever arm. The accumulation starts at the root end
/// and never resets mid-walk, so each ancestor's angular speed reaches every
/// lever below it. The object term for the link's own joint closes the sum.
#[derive(Debug, Clone)]
pub struct LinkBound {
    model: Arc<Model>,
    movement: Arc<dyn VelocityBounds>,
    link: LinkId,
    chain: Vec<JointId>,
}

impl LinkBound {
    /// Creates the accumulator for `link`.
    pub fn new(model: Arc<Model>, movement: Arc<dyn VelocityBounds>, link: LinkId) -> Self {
        let chain = model
            .parent_joint(link)
            .map(|last| model.joints_chain_from_last_joint(last))
            .unwrap_or_default();
        debug!(link = model.link(link).name(), depth = chain.len(), "link bound built");
        Self {
            model,
            movement,
            link,
            chain,
        }
    }

    /// Creates the accumulator for the link called `name`.
    ///
    /// # Errors
    /// [`ChainError::UnknownLink`] if the model has no such link.
    pub fn for_link_name(
        model: Arc<Model>,
        movement: Arc<dyn VelocityBounds>,
        name: &str,
    ) -> Result<Self, ChainError> {
        let link = model
            .link_by_name(name)
            .ok_or_else(|| ChainError::UnknownLink(name.to_owned()))?;
        Ok(Self::new(model, movement, link))
    }

    /// Bounded link.
    pub fn link(&self) -> LinkId {
        self.link
    }

    /// Joint attaching the bounded link; `None` for the root link.
    pub fn last_joint(&self) -> Option<JointId> {
        self.chain.first().copied()
    }

    /// Ancestor joints, leaf to root.
    pub fn joints_chain(&self) -> &[JointId] {
        &self.chain
    }

    /// Model the chain belongs to.
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Velocity provider.
    pub fn movement(&self) -> &Arc<dyn VelocityBounds> {
        &self.movement
    }

    /// World pose of the bounded link at normalized time `t`.
    pub fn global_transform(&self, t: f64) -> Transform {
        self.movement.global_transform(self.link, t)
    }

    /// Bound on the speed of any point of the link within `max_distance` of
    /// its joint centre, over `[start, end]`.
    ///
    /// Times are clamped into `[0, 1]` and ordered. A `direction` longer than
    /// `EPSILON` is normalized and restricts the root-level term to motion
    /// along it; a shorter one gives the non-directional bound, never smaller. A link
    /// without a parent joint yields `0`.
    ///
    /// # Errors
    /// [`ChainError::MissingParentJoint`] if a non-root chain joint has no
    /// parent joint.
    #[instrument(skip(self, cache), level = "trace")]
    pub fn motion_bound(
        &self,
        cache: &mut LinkBoundCache,
        start: f64,
        end: f64,
        direction: &Vec3,
        max_distance: f64,
    ) -> Result<f64, ChainError> {
        let window = TimeWindow::new(start, end);
        let [d0, d1, d2] = direction.to_bits();
        let [w0, w1] = window.to_bits();
        let key = (self.link, [w0, w1, d0, d1, d2]);

        if let Some((cached, totals)) = &cache.entry {
            if *cached == key {
                debug!(link = self.link.index(), "link bound cache hit");
                return Ok(totals.total(max_distance));
            }
        }
        debug!(link = self.link.index(), "link bound cache miss");

        let direction = direction.try_normalize();
        let mut rates = ProviderRates {
            model: &self.model,
            movement: self.movement.as_ref(),
        };
        let totals = fold_chain(&self.chain, &mut rates, window, direction)?;
        cache.entry = Some((key, totals));
        Ok(totals.total(max_distance))
    }
}

/// Uncached view of the provider for one walk.
struct ProviderRates<'a> {
    model: &'a Model,
    movement: &'a dyn VelocityBounds,
}

impl ChainRates for ProviderRates<'_> {
    fn joint_parent(&self, joint: JointId) -> Option<JointId> {
        self.model.joint_parent(joint)
    }

    fn joint_name(&self, joint: JointId) -> String {
        self.model.joint(joint).name().to_owned()
    }

    fn linear(&mut self, joint: JointId, window: TimeWindow) -> Vec3 {
        self.movement.linear_velocity_bound(joint, window)
    }

    fn absolute_linear(&mut self, joint: JointId, window: TimeWindow) -> f64 {
        self.movement.absolute_linear_velocity_bound(joint, window)
    }

    fn angular(&mut self, joint: JointId, window: TimeWindow) -> Vec3 {
        self.movement.angular_velocity_bound(joint, window)
    }

    fn lever(&mut self, child: JointId, parent: JointId) -> f64 {
        self.movement.child_parent_distance_bound(child, parent)
    }
}
