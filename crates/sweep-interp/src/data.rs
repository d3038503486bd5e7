// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use serde::{Deserialize, Serialize};

/// Type tag selecting an interpolation constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationKind {
    /// Constant-velocity interpolation.
    Linear,
    /// Cubic ease-in/ease-out with bounded velocity, acceleration and jerk.
    ThirdOrder,
}

/// Velocity, acceleration and jerk limits for third-order curves, in joint
/// units per normalized time unit (and its powers).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThirdOrderLimits {
    /// Maximum |velocity|.
    pub max_velocity: f64,
    /// Maximum |acceleration|.
    pub max_acceleration: f64,
    /// Maximum |jerk|.
    pub max_jerk: f64,
}

/// Construction data for an interpolation; the variant declares its kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterpolationData {
    /// Linear interpolation carries no extra data.
    #[default]
    Linear,
    /// Third-order interpolation with its limits.
    ThirdOrder(ThirdOrderLimits),
}

impl InterpolationData {
    /// Declared type tag.
    pub fn kind(&self) -> InterpolationKind {
        match self {
            Self::Linear => InterpolationKind::Linear,
            Self::ThirdOrder(_) => InterpolationKind::ThirdOrder,
        }
    }
}
