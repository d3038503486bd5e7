// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::Vec3;

/// Row-major 3×3 matrix, used for rotations and skew (hat) operators.
///
/// # Examples
/// ```
/// use sweep_math::{Mat3, Vec3};
/// let k = Mat3::hat(&Vec3::UNIT_Z);
/// // hat(a) * b == a × b
/// assert_eq!(k.transform(&Vec3::UNIT_X), Vec3::UNIT_Y);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3 {
    rows: [[f64; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat3 {
    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self {
            rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Returns the zero matrix.
    pub const fn zero() -> Self {
        Self { rows: [[0.0; 3]; 3] }
    }

    /// Creates a matrix from its rows.
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Returns the rows as nested arrays.
    pub fn to_rows(self) -> [[f64; 3]; 3] {
        self.rows
    }

    /// Entry at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Row `row` as a vector.
    pub fn row(&self, row: usize) -> Vec3 {
        Vec3::from(self.rows[row])
    }

    /// Skew-symmetric cross-product matrix: `hat(v) * w == v × w`.
    pub fn hat(v: &Vec3) -> Self {
        let [x, y, z] = v.to_array();
        Self::from_rows([[0.0, -z, y], [z, 0.0, -x], [-y, x, 0.0]])
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Self::from_rows(out)
    }

    /// Entry-wise sum.
    pub fn add(&self, rhs: &Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }

    /// Entry-wise difference.
    pub fn sub(&self, rhs: &Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }

    /// Scales every entry.
    pub fn scale(&self, s: f64) -> Self {
        self.zip(self, |a, _| a * s)
    }

    /// Transposed matrix (the inverse for rotations).
    pub fn transpose(&self) -> Self {
        let r = &self.rows;
        Self::from_rows([
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ])
    }

    /// Matrix-vector product `self * v`.
    pub fn transform(&self, v: &Vec3) -> Vec3 {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }

    fn zip(&self, rhs: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = f(self.rows[i][j], rhs.rows[i][j]);
            }
        }
        Self::from_rows(out)
    }
}

impl From<[[f64; 3]; 3]> for Mat3 {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }
}

impl core::ops::Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
