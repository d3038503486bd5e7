// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Kinematic-chain motion bounds for sweep.
//!
//! A [`Model`] is a tree of links connected by joints. A [`Movement`] moves
//! every joint between two configurations and answers per-joint velocity
//! bounds over a [`TimeWindow`] through the [`VelocityBounds`] trait.
//! [`LinkBound`] and [`ModelBound`] fold those per-joint bounds along the
//! ancestor chain of a link into one conservative scalar: an upper bound on
//! how fast any point of that link, within a given distance of its joint
//! centre, can move.
//!
//! Query caches are explicit values ([`LinkBoundCache`], [`JointBoundInfo`]);
//! models and movements are shared read-only behind `Arc`.

mod accumulate;
mod config;
mod error;
mod joint_bound_info;
mod link_bound;
mod model;
mod model_bound;
mod movement;
mod window;

pub use config::ModelConfig;
pub use error::{ChainError, ModelError};
pub use joint_bound_info::{JointBoundInfo, JointRates};
pub use link_bound::{LinkBound, LinkBoundCache};
pub use model::{
    Joint, JointDescription, JointId, JointKind, Link, LinkId, Model, ModelBuilder,
    ModelDescription,
};
pub use model_bound::ModelBound;
pub use movement::{Movement, VelocityBounds};
pub use window::TimeWindow;
