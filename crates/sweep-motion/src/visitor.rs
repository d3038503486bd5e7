// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::Vec3;

use crate::aabb::Aabb;
use crate::articular::ArticularMotion;
use crate::cache::MotionCache;
use crate::error::MotionError;
use crate::interp::InterpMotion;
use crate::motion::Motion;
use crate::screw::ScrewMotion;
use crate::spline::SplineMotion;

/// Shape-specific motion bound, one method per motion kind.
///
/// Implementations return a bound on the rate at which any point of their
/// shape moves along their direction, per unit of normalized time, from the
/// cached time to the end of the motion. Multiplying by the remaining time
/// bounds the displacement. `cache` must hold the motion's last integration.
pub trait MotionBoundVisitor {
    /// Bound under a screw motion.
    fn visit_screw(
        &self,
        motion: &ScrewMotion,
        cache: &mut MotionCache,
    ) -> Result<f64, MotionError>;

    /// Bound under an interpolated motion.
    fn visit_interp(
        &self,
        motion: &InterpMotion,
        cache: &mut MotionCache,
    ) -> Result<f64, MotionError>;

    /// Bound under a spline motion.
    fn visit_spline(
        &self,
        motion: &SplineMotion,
        cache: &mut MotionCache,
    ) -> Result<f64, MotionError>;

    /// Bound under an articulated motion.
    fn visit_articular(
        &self,
        motion: &ArticularMotion,
        cache: &mut MotionCache,
    ) -> Result<f64, MotionError>;
}

/// `None` for a direction too short to normalize, the unit direction otherwise.
fn unit(direction: &Vec3) -> Option<Vec3> {
    direction.try_normalize()
}

/// Rate bounds for a finite set of body-frame points.
struct PointSet<'a> {
    points: &'a [Vec3],
    direction: Option<&'a Vec3>,
}

impl PointSet<'_> {
    fn screw(&self, motion: &ScrewMotion, cache: &MotionCache) -> f64 {
        let world = cache.transform;
        motion.rate_bound(
            self.points.iter().map(|p| world.transform_point(p)),
            self.direction,
        )
    }

    fn interp(&self, motion: &InterpMotion) -> f64 {
        motion.rate_bound(self.points.iter().copied(), self.direction)
    }

    fn spline(&self, motion: &SplineMotion) -> f64 {
        motion.rate_bound(self.points.iter().copied(), self.direction)
    }

    fn articular(
        &self,
        motion: &ArticularMotion,
        cache: &mut MotionCache,
    ) -> Result<f64, MotionError> {
        let reach = motion.reach(self.points.iter().copied());
        let direction = self.direction.copied().unwrap_or(Vec3::ZERO);
        motion.motion_bound(cache, &direction, reach)
    }
}

/// Bounding-volume visitor: a body-frame box moving along `direction`.
///
/// A zero or sub-`EPSILON` direction bounds the speed instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbBoundVisitor {
    aabb: Aabb,
    direction: Option<Vec3>,
}

impl AabbBoundVisitor {
    /// Visitor for `aabb` (body frame) along `direction` (normalized).
    pub fn new(aabb: Aabb, direction: Vec3) -> Self {
        Self {
            aabb,
            direction: unit(&direction),
        }
    }

    /// Box in the body frame.
    pub fn aabb(&self) -> Aabb {
        self.aabb
    }

    fn point_set<'a>(&'a self, corners: &'a [Vec3; 8]) -> PointSet<'a> {
        PointSet {
            points: corners,
            direction: self.direction.as_ref(),
        }
    }
}

/// Triangle visitor: three body-frame vertices moving along `direction`.
///
/// A zero or sub-`EPSILON` direction bounds the speed instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleBoundVisitor {
    vertices: [Vec3; 3],
    direction: Option<Vec3>,
}

impl TriangleBoundVisitor {
    /// Visitor for the triangle `vertices` (body frame) along `direction`
    /// (normalized).
    pub fn new(vertices: [Vec3; 3], direction: Vec3) -> Self {
        Self {
            vertices,
            direction: unit(&direction),
        }
    }

    /// Vertices in the body frame.
    pub fn vertices(&self) -> [Vec3; 3] {
        self.vertices
    }

    fn point_set(&self) -> PointSet<'_> {
        PointSet {
            points: &self.vertices,
            direction: self.direction.as_ref(),
        }
    }
}

impl MotionBoundVisitor for AabbBoundVisitor {
    fn visit_screw(
        &self,
        motion: &ScrewMotion,
        cache: &mut MotionCache,
    ) -> Result<f64, MotionError> {
        let corners = self.aabb.corners();
        Ok(self.point_set(&corners).screw(motion, cache))
    }

    fn visit_interp(
        &self,
        motion: &InterpMotion,
        _cache: &mut MotionCache,
    ) -> Result<f64, MotionError> {
        let corners = self.aabb.corners();
        Ok(self.point_set(&corners).interp(motion))
    }

    fn visit_spline(
        &self,
        motion: &SplineMotion,
        _cache: &mut MotionCache,
    ) -> Result<f64, MotionError> {
        let corners = self.aabb.corners();
        Ok(self.point_set(&corners).spline(motion))
    }

    fn visit_articular(
        &self,
        motion: &ArticularMotion,
        cache: &mut MotionCache,
    ) -> Result<f64, MotionError> {
        let corners = self.aabb.corners();
        self.point_set(&corners).articular(motion, cache)
    }
}

impl MotionBoundVisitor for TriangleBoundVisitor {
    fn visit_screw(
        &self,
        motion: &ScrewMotion,
        cache: &mut MotionCache,
    ) -> Result<f64, MotionError> {
        Ok(self.point_set().screw(motion, cache))
    }

    fn visit_interp(
        &self,
        motion: &InterpMotion,
        _cache: &mut MotionCache,
    ) -> Result<f64, MotionError> {
        Ok(self.point_set().interp(motion))
    }

    fn visit_spline(
        &self,
        motion: &SplineMotion,
        _cache: &mut MotionCache,
    ) -> Result<f64, MotionError> {
        Ok(self.point_set().spline(motion))
    }

    fn visit_articular(
        &self,
        motion: &ArticularMotion,
        cache: &mut MotionCache,
    ) -> Result<f64, MotionError> {
        self.point_set().articular(motion, cache)
    }
}

/// Box enclosing `shape` (body frame) over the rest of the motion, from the
/// cached pose to `t = 1`.
///
/// The box at the cached pose is grown on each axis by the axis rate bound
/// times the remaining time.
pub fn swept_aabb(
    motion: &Motion,
    cache: &mut MotionCache,
    shape: &Aabb,
) -> Result<Aabb, MotionError> {
    let remaining = 1.0 - cache.time;
    let mut margin = [0.0; 3];
    for (m, axis) in margin.iter_mut().zip([Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z]) {
        let rate = motion.compute_motion_bound(cache, &AabbBoundVisitor::new(*shape, axis))?;
        *m = rate * remaining;
    }
    Ok(shape
        .transformed(&cache.transform)
        .expand(&Vec3::from(margin)))
}
