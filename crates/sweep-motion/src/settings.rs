// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Numeric knobs of the motion models.
///
/// Missing JSON fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionSettings {
    /// Screw rotations with an angle below this collapse to pure translation.
    pub degenerate_angle: f64,
    /// Half-width of the loose remainder attached to spline rotation models.
    pub spline_rotation_remainder: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            degenerate_angle: 1e-10,
            spline_rotation_remainder: 1.0 / 48.0,
        }
    }
}

impl MotionSettings {
    /// Parses and validates settings from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_slice(bytes)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings as pretty JSON.
    pub fn to_json_vec(&self) -> Result<Vec<u8>, SettingsError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Checks every value is finite and non-negative, and that
    /// `degenerate_angle` is positive.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.degenerate_angle <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "degenerate_angle",
                value: self.degenerate_angle,
            });
        }
        for (field, value) in [
            ("degenerate_angle", self.degenerate_angle),
            ("spline_rotation_remainder", self.spline_rotation_remainder),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid { field, value });
            }
        }
        Ok(())
    }
}
