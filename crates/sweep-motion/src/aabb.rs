// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::{Transform, Vec3};

/// Axis-aligned bounding box.
///
/// Invariant: every `min` component is less than or equal to its `max`
/// counterpart; constructors sort the components to keep it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from two opposite corners.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x().min(b.x()), a.y().min(b.y()), a.z().min(b.z())),
            max: Vec3::new(a.x().max(b.x()), a.y().max(b.y()), a.z().max(b.z())),
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy, hz`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f64, hy: f64, hz: f64) -> Self {
        let he = Vec3::new(hx.abs(), hy.abs(), hz.abs());
        Self::new(center.sub(&he), center.add(&he))
    }

    /// The eight corners.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let [minx, miny, minz] = self.min.to_array();
        let [maxx, maxy, maxz] = self.max.to_array();
        [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ]
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        (0..3).all(|i| a_max[i] >= b_min[i] && a_min[i] <= b_max[i])
    }

    /// Grows each face outward by the matching component of `margin`.
    #[must_use]
    pub fn expand(&self, margin: &Vec3) -> Self {
        let m = margin.abs();
        Self {
            min: self.min.sub(&m),
            max: self.max.add(&m),
        }
    }

    /// Box bounding this one after `tf`, from its eight transformed corners.
    #[must_use]
    pub fn transformed(&self, tf: &Transform) -> Self {
        let corners = self.corners().map(|c| tf.transform_point(&c));
        let mut min = corners[0];
        let mut max = corners[0];
        for p in &corners[1..] {
            min = Vec3::new(min.x().min(p.x()), min.y().min(p.y()), min.z().min(p.z()));
            max = Vec3::new(max.x().max(p.x()), max.y().max(p.y()), max.z().max(p.z()));
        }
        Self { min, max }
    }
}
