// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::{clamp_unit, Transform};
use sweep_taylor::{Interval, TaylorMatrix, TaylorVector};
use tracing::{instrument, trace};

use crate::articular::ArticularMotion;
use crate::cache::MotionCache;
use crate::error::MotionError;
use crate::interp::InterpMotion;
use crate::screw::ScrewMotion;
use crate::spline::SplineMotion;
use crate::visitor::MotionBoundVisitor;

/// Rigid-body motion over normalized time `[0, 1]`.
///
/// Motions are immutable; query state lives in a [`MotionCache`].
#[derive(Debug, Clone)]
pub enum Motion {
    /// Rotation about and translation along a fixed axis.
    Screw(ScrewMotion),
    /// Constant linear and angular velocity about a reference point.
    Interp(InterpMotion),
    /// Cubic B-spline in translation and rotation vector.
    Spline(SplineMotion),
    /// Body attached to a link of an articulated model.
    Articular(ArticularMotion),
}

impl From<ScrewMotion> for Motion {
    fn from(m: ScrewMotion) -> Self {
        Self::Screw(m)
    }
}

impl From<InterpMotion> for Motion {
    fn from(m: InterpMotion) -> Self {
        Self::Interp(m)
    }
}

impl From<SplineMotion> for Motion {
    fn from(m: SplineMotion) -> Self {
        Self::Spline(m)
    }
}

impl From<ArticularMotion> for Motion {
    fn from(m: ArticularMotion) -> Self {
        Self::Articular(m)
    }
}

impl Motion {
    /// Lowercase name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Screw(_) => "screw",
            Self::Interp(_) => "interp",
            Self::Spline(_) => "spline",
            Self::Articular(_) => "articular",
        }
    }

    /// Pose at normalized time `t` (clamped), computed from the
    /// construction parameters.
    pub fn transform_at(&self, t: f64) -> Result<Transform, MotionError> {
        match self {
            Self::Screw(m) => Ok(m.transform_at(t)),
            Self::Interp(m) => Ok(m.transform_at(t)),
            Self::Spline(m) => Ok(m.transform_at(t)),
            Self::Articular(m) => m.transform_at(t),
        }
    }

    /// Pose at `t = 0`.
    pub fn start_transform(&self) -> Result<Transform, MotionError> {
        self.transform_at(0.0)
    }

    /// Pose at `t = 1`.
    pub fn end_transform(&self) -> Result<Transform, MotionError> {
        self.transform_at(1.0)
    }

    /// Fresh cache integrated at `t = 0`.
    pub fn initial_cache(&self) -> Result<MotionCache, MotionError> {
        let mut cache = MotionCache::default();
        self.integrate(&mut cache, 0.0, 1.0)?;
        Ok(cache)
    }

    /// Stores the pose at `start_time` (clamped) in `cache`.
    ///
    /// `end_time` only bounds the query window for tracing; the pose is
    /// always recomputed from the construction parameters. On error the
    /// cache is left untouched.
    pub fn integrate(
        &self,
        cache: &mut MotionCache,
        start_time: f64,
        end_time: f64,
    ) -> Result<(), MotionError> {
        let time = clamp_unit(start_time);
        let transform = self.transform_at(time)?;
        trace!(kind = self.kind_name(), time, end_time, "integrated");
        cache.time = time;
        cache.transform = transform;
        Ok(())
    }

    /// Dispatches `visitor` on the variant.
    ///
    /// Articulated motions refresh the chain-bound cache stored in `cache`.
    #[instrument(skip(self, cache, visitor), fields(kind = self.kind_name()), level = "trace")]
    pub fn compute_motion_bound<V>(
        &self,
        cache: &mut MotionCache,
        visitor: &V,
    ) -> Result<f64, MotionError>
    where
        V: MotionBoundVisitor + ?Sized,
    {
        match self {
            Self::Screw(m) => visitor.visit_screw(m, cache),
            Self::Interp(m) => visitor.visit_interp(m, cache),
            Self::Spline(m) => visitor.visit_spline(m, cache),
            Self::Articular(m) => visitor.visit_articular(m, cache),
        }
    }

    /// Rotation matrix and translation as Taylor models over `window`,
    /// clamped into `[0, 1]`.
    ///
    /// # Errors
    /// [`MotionError::TaylorModelUnsupported`] for articulated motions.
    pub fn taylor_model(
        &self,
        window: Interval,
    ) -> Result<(TaylorMatrix, TaylorVector), MotionError> {
        let time = Interval::new(clamp_unit(window.lo()), clamp_unit(window.hi()));
        match self {
            Self::Screw(m) => Ok(m.taylor_model(time)),
            Self::Interp(m) => Ok(m.taylor_model(time)),
            Self::Spline(m) => Ok(m.taylor_model(time)),
            Self::Articular(_) => Err(MotionError::TaylorModelUnsupported(self.kind_name())),
        }
    }
}
