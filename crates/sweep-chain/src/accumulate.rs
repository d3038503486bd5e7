// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Chain fold shared by [`crate::LinkBound`] and [`crate::ModelBound`].

use sweep_math::Vec3;
use tracing::trace;

use crate::error::ChainError;
use crate::model::JointId;
use crate::window::TimeWindow;

/// Source of per-joint rates for one accumulator.
pub(crate) trait ChainRates {
    fn joint_parent(&self, joint: JointId) -> Option<JointId>;
    fn joint_name(&self, joint: JointId) -> String;
    fn linear(&mut self, joint: JointId, window: TimeWindow) -> Vec3;
    fn absolute_linear(&mut self, joint: JointId, window: TimeWindow) -> f64;
    fn angular(&mut self, joint: JointId, window: TimeWindow) -> Vec3;
    fn lever(&mut self, child: JointId, parent: JointId) -> f64;
}

/// Partial sums of a chain walk; `max_distance` is applied last so the
/// walk itself can be cached independently of it.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub(crate) struct ChainTotals {
    /// Sum of the per-ancestor contributions.
    pub(crate) chain: f64,
    /// Angular bound accumulated over the ancestors.
    pub(crate) angular: f64,
    /// Speed bound of the last joint's frame.
    pub(crate) last_linear: f64,
    /// Angular speed bound of the last joint.
    pub(crate) last_angular: f64,
}

impl ChainTotals {
    pub(crate) fn total(&self, max_distance: f64) -> f64 {
        self.chain + self.last_linear + (self.angular + self.last_angular) * max_distance
    }
}

/// Folds `chain` (leaf to root, root joint last) into partial sums.
///
/// The root joint is skipped as a chain member; it enters as the parent of
/// the joint right below it, directionally when `direction` is `Some`.
/// Members are visited outermost first so every ancestor's angular speed
/// multiplies each lever arm below it.
pub(crate) fn fold_chain(
    chain: &[JointId],
    rates: &mut impl ChainRates,
    window: TimeWindow,
    direction: Option<Vec3>,
) -> Result<ChainTotals, ChainError> {
    let Some((&last, _)) = chain.split_first() else {
        return Ok(ChainTotals::default());
    };
    let walk = &chain[..chain.len() - 1];

    let mut totals = ChainTotals::default();
    for &joint in walk.iter().rev() {
        let parent = rates
            .joint_parent(joint)
            .ok_or_else(|| ChainError::MissingParentJoint(rates.joint_name(joint)))?;
        let lever = rates.lever(joint, parent);
        let parent_is_root = rates.joint_parent(parent).is_none();
        let term = match direction {
            Some(d) if parent_is_root => {
                totals.angular += d.cross(&rates.angular(parent, window)).length();
                rates.linear(parent, window).dot(&d).abs() + totals.angular * lever
            }
            _ => {
                totals.angular += rates.angular(parent, window).length();
                rates.absolute_linear(parent, window) + totals.angular * lever
            }
        };
        trace!(joint = joint.index(), term, angular = totals.angular, "chain term");
        totals.chain += term;
    }

    totals.last_linear = rates.absolute_linear(last, window);
    totals.last_angular = rates.angular(last, window).length();
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rates where no joint has a parent.
    struct Broken;

    impl ChainRates for Broken {
        fn joint_parent(&self, _joint: JointId) -> Option<JointId> {
            None
        }
        fn joint_name(&self, _joint: JointId) -> String {
            "orphan".to_owned()
        }
        fn linear(&mut self, _joint: JointId, _window: TimeWindow) -> Vec3 {
            Vec3::ZERO
        }
        fn absolute_linear(&mut self, _joint: JointId, _window: TimeWindow) -> f64 {
            0.0
        }
        fn angular(&mut self, _joint: JointId, _window: TimeWindow) -> Vec3 {
            Vec3::ZERO
        }
        fn lever(&mut self, _child: JointId, _parent: JointId) -> f64 {
            0.0
        }
    }

    #[test]
    fn missing_parent_fails_fast() {
        let chain = [JointId::for_tests(2), JointId::for_tests(1), JointId::for_tests(0)];
        let err = fold_chain(&chain, &mut Broken, TimeWindow::FULL, None).expect_err("orphan");
        assert_eq!(err, ChainError::MissingParentJoint("orphan".into()));
    }

    #[test]
    fn empty_chain_is_zero() {
        let totals = fold_chain(&[], &mut Broken, TimeWindow::FULL, None).expect("empty");
        assert_eq!(totals.total(5.0), 0.0);
    }
}
