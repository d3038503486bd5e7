// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::sync::Arc;

use rustc_hash::FxHashMap;
use sweep_math::Vec3;
use tracing::trace;

use crate::model::JointId;
use crate::movement::VelocityBounds;
use crate::window::TimeWindow;

/// Velocity bounds of one joint over one window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JointRates {
    /// Linear velocity bound vector.
    pub linear: Vec3,
    /// Speed bound of the joint frame.
    pub absolute_linear: f64,
    /// Angular velocity bound vector.
    pub angular: Vec3,
}

/// Per-joint cache in front of a [`VelocityBounds`] provider.
///
/// Rates are held for the current window only: a query over a window whose
/// bits differ from the current one drops every cached rate first, so an
/// advancing query stream keeps at most one entry per joint. Lever arms are
/// time independent and keyed by the `(child, parent)` pair.
#[derive(Debug, Clone)]
pub struct JointBoundInfo {
    provider: Arc<dyn VelocityBounds>,
    window: Option<[u64; 2]>,
    rates: FxHashMap<JointId, JointRates>,
    levers: FxHashMap<(JointId, JointId), f64>,
}

impl JointBoundInfo {
    /// Wraps `provider` with an empty cache.
    pub fn new(provider: Arc<dyn VelocityBounds>) -> Self {
        Self {
            provider,
            window: None,
            rates: FxHashMap::default(),
            levers: FxHashMap::default(),
        }
    }

    /// Underlying provider.
    pub fn provider(&self) -> &Arc<dyn VelocityBounds> {
        &self.provider
    }

    /// Makes `window` the current window, dropping rates cached for another.
    pub fn set_current_window(&mut self, window: TimeWindow) {
        let bits = window.to_bits();
        if self.window != Some(bits) {
            trace!(cached = self.rates.len(), "joint rates window changed");
            self.rates.clear();
            self.window = Some(bits);
        }
    }

    /// All rates of `joint` over `window`, fetched once per joint while
    /// `window` stays current.
    pub fn rates(&mut self, joint: JointId, window: TimeWindow) -> JointRates {
        self.set_current_window(window);
        let provider = &self.provider;
        *self.rates.entry(joint).or_insert_with(|| {
            trace!(joint = joint.index(), "joint rates miss");
            JointRates {
                linear: provider.linear_velocity_bound(joint, window),
                absolute_linear: provider.absolute_linear_velocity_bound(joint, window),
                angular: provider.angular_velocity_bound(joint, window),
            }
        })
    }

    /// Linear velocity bound of `joint`.
    pub fn linear_velocity_bound(&mut self, joint: JointId, window: TimeWindow) -> Vec3 {
        self.rates(joint, window).linear
    }

    /// Speed bound of `joint`'s frame.
    pub fn absolute_linear_velocity_bound(&mut self, joint: JointId, window: TimeWindow) -> f64 {
        self.rates(joint, window).absolute_linear
    }

    /// Angular velocity bound of `joint`.
    pub fn angular_velocity_bound(&mut self, joint: JointId, window: TimeWindow) -> Vec3 {
        self.rates(joint, window).angular
    }

    /// Distance bound between `child` and `parent` joint centres.
    pub fn vector_length_bound(&mut self, child: JointId, parent: JointId) -> f64 {
        let provider = &self.provider;
        *self
            .levers
            .entry((child, parent))
            .or_insert_with(|| provider.child_parent_distance_bound(child, parent))
    }

    /// Number of joints with rates cached for the current window.
    pub fn cached_rates(&self) -> usize {
        self.rates.len()
    }

    /// Drops every cached value.
    pub fn clear(&mut self) {
        self.window = None;
        self.rates.clear();
        self.levers.clear();
    }
}
