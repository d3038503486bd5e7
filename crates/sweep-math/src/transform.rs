// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::{Mat3, Quat, Vec3};

/// Rigid transform: rotation followed by translation, `x ↦ R x + T`.
///
/// Immutable value type. The rotation is stored as a unit quaternion; the
/// matrix form is derived on demand.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    rotation: Quat,
    translation: Vec3,
}

impl Transform {
    /// Identity transform (no rotation, no translation).
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            rotation: Quat::identity(),
            translation: Vec3::ZERO,
        }
    }

    /// Creates a transform from a rotation and a translation.
    #[must_use]
    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation: rotation.normalize(),
            translation,
        }
    }

    /// Creates a transform from a rotation matrix and a translation.
    #[must_use]
    pub fn from_matrix(rotation: &Mat3, translation: Vec3) -> Self {
        Self::new(Quat::from_mat3(rotation), translation)
    }

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(Quat::identity(), translation)
    }

    /// Rotation component.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Rotation component as a matrix.
    #[must_use]
    pub fn rotation_matrix(&self) -> Mat3 {
        self.rotation.to_mat3()
    }

    /// Translation component.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn transform_point(&self, p: &Vec3) -> Vec3 {
        self.rotation.rotate(p).add(&self.translation)
    }

    /// Composition `self ∘ other`: applies `other` first.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self::new(
            self.rotation.multiply(&other.rotation),
            self.transform_point(&other.translation),
        )
    }

    /// Inverse transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv = self.rotation.conjugate();
        Self::new(inv, inv.rotate(&self.translation).neg())
    }

    /// Returns `true` when both transforms agree within `tol` on translation
    /// and rotation (sign-insensitive on the quaternion).
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        let dt = self.translation.sub(&other.translation).length();
        let dq = 1.0 - self.rotation.dot(&other.rotation).abs();
        dt <= tol && dq <= tol
    }
}
