// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Motion representation and conservative motion bounds for sweep CCD.
//!
//! A [`Motion`] moves a rigid body from a start pose at `t = 0` to an end
//! pose at `t = 1`. Every query clamps time into `[0, 1]` and recomputes the
//! pose from the construction parameters rather than from the previous pose.
//!
//! The last integrated pose is kept in a [`MotionCache`] owned by the caller:
//! motions themselves are immutable and can be shared freely.
//!
//! Bounds are computed through a [`MotionBoundVisitor`], which pairs a shape
//! (box, triangle, ...) with each motion kind. All bounds over-approximate.

mod aabb;
mod articular;
mod cache;
mod error;
mod interp;
mod motion;
mod screw;
mod settings;
mod spline;
mod visitor;

pub use aabb::Aabb;
pub use articular::ArticularMotion;
pub use cache::MotionCache;
pub use error::{MotionError, SettingsError};
pub use interp::InterpMotion;
pub use motion::Motion;
pub use screw::ScrewMotion;
pub use settings::MotionSettings;
pub use spline::SplineMotion;
pub use visitor::{swept_aabb, AabbBoundVisitor, MotionBoundVisitor, TriangleBoundVisitor};
