// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_math::{Mat3, Vec3};

use crate::interval::Interval;
use crate::model::TaylorModel;

/// A 3-vector whose components are Taylor models over a shared time interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TaylorVector {
    items: [TaylorModel; 3],
}

impl TaylorVector {
    /// The zero vector over `time`.
    pub fn zero(time: Interval) -> Self {
        Self {
            items: [TaylorModel::zero(time); 3],
        }
    }

    /// Builds a vector from three component models.
    pub fn from_models(x: TaylorModel, y: TaylorModel, z: TaylorModel) -> Self {
        Self { items: [x, y, z] }
    }

    /// The constant vector `v`.
    pub fn constant(v: &Vec3, time: Interval) -> Self {
        Self::from_models(
            TaylorModel::constant(v.x(), time),
            TaylorModel::constant(v.y(), time),
            TaylorModel::constant(v.z(), time),
        )
    }

    /// Component `i`.
    pub fn get(&self, i: usize) -> &TaylorModel {
        &self.items[i]
    }

    /// Declared time interval.
    pub fn time(&self) -> Interval {
        self.items[0].time()
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        Self {
            items: core::array::from_fn(|i| self.items[i].add(&other.items[i])),
        }
    }

    /// Component-wise difference.
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            items: core::array::from_fn(|i| self.items[i].sub(&other.items[i])),
        }
    }

    /// Adds a constant vector.
    pub fn add_vec3(&self, v: &Vec3) -> Self {
        Self {
            items: core::array::from_fn(|i| self.items[i].add_scalar(v.get(i))),
        }
    }

    /// Subtracts a constant vector.
    pub fn sub_vec3(&self, v: &Vec3) -> Self {
        self.add_vec3(&v.neg())
    }

    /// Point-wise enclosure at `t`.
    pub fn enclose(&self, t: f64) -> [Interval; 3] {
        core::array::from_fn(|i| self.items[i].enclose(t))
    }

    /// Enclosure of every component over the time interval.
    pub fn bound(&self) -> [Interval; 3] {
        core::array::from_fn(|i| self.items[i].bound())
    }
}

/// A 3×3 matrix of Taylor models over a shared time interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TaylorMatrix {
    rows: [[TaylorModel; 3]; 3],
}

impl TaylorMatrix {
    /// The constant matrix `m`.
    pub fn constant(m: &Mat3, time: Interval) -> Self {
        Self {
            rows: core::array::from_fn(|i| {
                core::array::from_fn(|j| TaylorModel::constant(m.at(i, j), time))
            }),
        }
    }

    /// The identity matrix.
    pub fn identity(time: Interval) -> Self {
        Self::constant(&Mat3::identity(), time)
    }

    /// The matrix `m · s(t)` for a constant matrix and a scalar model.
    pub fn scaled(m: &Mat3, s: &TaylorModel) -> Self {
        Self {
            rows: core::array::from_fn(|i| core::array::from_fn(|j| s.scale(m.at(i, j)))),
        }
    }

    /// Rodrigues rotation `I + sin·K + (1 − cos)·K²` with `K = hat(axis)`.
    ///
    /// `sin` and `cos` model the sine and cosine of the rotation angle.
    pub fn rodrigues(axis: &Vec3, sin: &TaylorModel, cos: &TaylorModel) -> Self {
        let time = sin.time();
        let k = Mat3::hat(axis);
        let k2 = k.multiply(&k);
        let one_minus_cos = cos.neg().add_scalar(1.0);
        Self::scaled(&k, sin)
            .add(&Self::scaled(&k2, &one_minus_cos))
            .add(&Self::identity(time))
    }

    /// Entry `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> &TaylorModel {
        &self.rows[i][j]
    }

    /// Declared time interval.
    pub fn time(&self) -> Interval {
        self.rows[0][0].time()
    }

    /// Entry-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        Self {
            rows: core::array::from_fn(|i| {
                core::array::from_fn(|j| self.rows[i][j].add(&other.rows[i][j]))
            }),
        }
    }

    /// Product with a constant matrix on the right: `self · m`.
    pub fn mul_mat3(&self, m: &Mat3) -> Self {
        let time = self.time();
        Self {
            rows: core::array::from_fn(|i| {
                core::array::from_fn(|j| {
                    (0..3).fold(TaylorModel::zero(time), |acc, k| {
                        acc.add(&self.rows[i][k].scale(m.at(k, j)))
                    })
                })
            }),
        }
    }

    /// Product with a constant vector: `self · v`.
    pub fn mul_vec3(&self, v: &Vec3) -> TaylorVector {
        let time = self.time();
        let items: [TaylorModel; 3] = core::array::from_fn(|i| {
            (0..3).fold(TaylorModel::zero(time), |acc, k| {
                acc.add(&self.rows[i][k].scale(v.get(k)))
            })
        });
        TaylorVector::from_models(items[0], items[1], items[2])
    }

    /// Point-wise enclosure at `t`.
    pub fn enclose(&self, t: f64) -> [[Interval; 3]; 3] {
        core::array::from_fn(|i| core::array::from_fn(|j| self.rows[i][j].enclose(t)))
    }

    /// Enclosure of every entry over the time interval.
    pub fn bound(&self) -> [[Interval; 3]; 3] {
        core::array::from_fn(|i| core::array::from_fn(|j| self.rows[i][j].bound()))
    }

    /// Applies `f` to every entry.
    pub fn map(&self, f: impl Fn(&TaylorModel) -> TaylorModel) -> Self {
        Self {
            rows: core::array::from_fn(|i| core::array::from_fn(|j| f(&self.rows[i][j]))),
        }
    }
}
